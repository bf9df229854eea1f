use std::{
    fs::File,
    io::Read,
};

use failure::{err_msg, Error, ResultExt};
use ringmesh::{
    Mesh,
    io::{obj, off, FileFormat},
};

use crate::args::SourceArgs;


pub mod check;
pub mod convert;
pub mod info;


/// Tries to find the file format of the given file.
///
/// The explicitly specified format `file_format` is preferred. If that's not
/// set, the format is guessed from the filename. If that won't work, it's
/// guessed from the file start: OFF files start with the `OFF` keyword.
fn guess_file_format(
    file_format: Option<FileFormat>,
    filename: &str,
) -> Result<FileFormat, Error> {
    if let Some(format) = file_format.or_else(|| FileFormat::from_extension(filename)) {
        return Ok(format);
    }

    let mut start = Vec::new();
    File::open(filename)?.take(1024).read_to_end(&mut start)?;
    let first_word = String::from_utf8_lossy(&start)
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .find(|line| !line.is_empty())
        .and_then(|line| line.split_whitespace().next())
        .map(|w| w.to_string());

    match first_word.as_ref().map(|w| w.as_str()) {
        Some("OFF") => Ok(FileFormat::Off),
        Some("v") | Some("vt") | Some("vn") | Some("f") | Some("mtllib") | Some("o")
            | Some("g") => Ok(FileFormat::Obj),
        _ => Err(err_msg(
            "couldn't determine source file format, please specify it explicitly using \
                '--source-format'"
        )),
    }
}

/// Loads the mesh file as described by the source arguments.
fn load_mesh(args: &SourceArgs, filename: &str) -> Result<(Mesh, FileFormat), Error> {
    let format = guess_file_format(args.source_format, filename)?;
    info!("Source format: {}", format);

    let mesh = progress!(["Reading '{}'", filename] => {
        match format {
            FileFormat::Obj => {
                let options = obj::ReadOptions { unify_vertices: args.unify_vertices };
                obj::Reader::open(filename)
                    .context(format!("failed to open '{}'", filename))?
                    .read(options)?
            }
            FileFormat::Off => {
                off::Reader::open(filename)
                    .context(format!("failed to open '{}'", filename))?
                    .read()?
            }
        }
    });

    Ok((mesh, format))
}
