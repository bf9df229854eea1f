use super::{
    FileFormat,
};

#[test]
fn from_extension() {
    macro_rules! check_for_format {
        ($lower:literal $upper:literal $mixed:literal => $variant:ident) => {{
            let exp = Some(FileFormat::$variant);
            assert_eq!(FileFormat::from_extension(concat!("foo.", $lower)), exp);
            assert_eq!(FileFormat::from_extension(concat!("foo.", $upper)), exp);
            assert_eq!(FileFormat::from_extension(concat!("foo.", $mixed)), exp);
            assert_eq!(FileFormat::from_extension(concat!("föö.", $lower)), exp);
            assert_eq!(FileFormat::from_extension(concat!("/bar/foo.", $lower)), exp);
        }}
    }

    check_for_format!("obj" "OBJ" "oBj" => Obj);
    check_for_format!("off" "OFF" "oFf" => Off);
}

#[test]
fn from_extension_none() {
    assert_eq!(FileFormat::from_extension("foo/bar/"), None);
    assert_eq!(FileFormat::from_extension("foo/bar"), None);
    assert_eq!(FileFormat::from_extension("foo/bar."), None);
    assert_eq!(FileFormat::from_extension("foo/.obj"), None);
    assert_eq!(FileFormat::from_extension("foo/bar.stl"), None);
}

#[test]
fn extension() {
    assert_eq!(FileFormat::Obj.extension(), "obj");
    assert_eq!(FileFormat::Off.extension(), "off");
    assert_eq!(FileFormat::Obj.to_string(), "OBJ");
}

#[test]
fn load_unknown_extension() {
    let err = super::load("mesh.xyz").unwrap_err();
    assert!(err.to_string().contains("mesh.xyz"));
}
