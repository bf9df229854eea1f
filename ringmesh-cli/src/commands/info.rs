use failure::Error;
use term_painter::{Color, ToStyle};
use ringmesh::{
    Mesh,
    attr::AttrStore,
    handle::Handle,
};

use crate::{
    args::InfoArgs,
    commands::load_mesh,
    ui,
};


pub fn run(args: &InfoArgs) -> Result<(), Error> {
    let (mesh, _) = load_mesh(&args.source, &args.file)?;

    println!();
    print_info(&mesh);

    Ok(())
}

/// Pretty prints element counts, attribute columns and materials.
pub(crate) fn print_info(mesh: &Mesh) {
    let label_style = Color::White.bold();
    let count_style = Color::Green.bold();

    let counts = [
        ("vertices ·", mesh.num_vertices()),
        ("edges    ╱", mesh.num_edges()),
        ("faces    △", mesh.num_faces()),
    ];
    for &(label, count) in &counts {
        println!(
            "  {} {: >12}",
            label_style.paint(label),
            count_style.paint(ui::fmt_with_thousand_sep(count as u64)),
        );
    }

    println!();
    print_columns("vertex", mesh.vertex_data());
    print_columns("face", mesh.face_data());

    match mesh.material_table() {
        Some(table) if !table.is_empty() => {
            println!(
                "  {} {} (libraries: {})",
                label_style.paint("materials:"),
                table.names().join(", "),
                if table.libraries().is_empty() {
                    "-".to_string()
                } else {
                    table.libraries().join(", ")
                },
            );
        }
        _ => println!("  {} -", label_style.paint("materials:")),
    }
}

fn print_columns<H: Handle>(element: &str, store: &AttrStore<H>) {
    let prop_style = Color::BrightBlue.bold();

    print!("  {} ", Color::White.bold().paint(format!("{} data:", element)));
    if store.is_empty() {
        println!("{}", Color::White.dim().paint("-"));
        return;
    }

    let columns = store.columns()
        .map(|(name, column)| format!("{} ({})", name, column.kind()))
        .collect::<Vec<_>>();
    println!("{}", prop_style.paint(columns.join(", ")));
}
