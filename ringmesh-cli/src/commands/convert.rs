use std::time::Instant;

use failure::{err_msg, Error, ResultExt};
use ringmesh::{
    prelude::*,
    Mesh,
    io::{obj, off, FileFormat},
};

use crate::{
    args::ConvertArgs,
    commands::{info::print_info, load_mesh},
};


pub fn run(args: &ConvertArgs) -> Result<(), Error> {
    let start_time = Instant::now();

    let before_load = Instant::now();
    let (mut mesh, _) = load_mesh(&args.source_args, &args.source)
        .context("could not read source file")?;
    let load_time = before_load.elapsed();

    if args.compute_normals {
        progress!(["Computing vertex normals"] => {
            mesh.compute_smooth_vertex_normals(true)?
        });
    }

    info!("Mesh information:");
    println!();
    print_info(&mesh);
    println!();

    let before_write = Instant::now();
    write_file(args, &mesh).context("could not write target file")?;
    let write_time = before_write.elapsed();

    info!(
        "Processing time: {:.2?} ({:.2?} loading, {:.2?} writing)",
        start_time.elapsed(),
        load_time,
        write_time,
    );

    Ok(())
}

fn write_file(args: &ConvertArgs, mesh: &Mesh) -> Result<(), Error> {
    let file_format = args.target_format
        .or_else(|| FileFormat::from_extension(&args.target))
        .ok_or_else(|| err_msg(
            "couldn't determine target file format, please specify it explicitly using \
                '--target-format'"
        ))?;
    info!("Target format: {}", file_format);
    if file_format == FileFormat::Off && mesh.vertex_data().len() + mesh.face_data().len() > 0 {
        warn!("OFF files store no extra data, only positions and faces are written");
    }

    progress!(["Writing mesh to '{}'", args.target] => {
        match file_format {
            FileFormat::Obj => {
                let options = obj::WriteOptions {
                    tex_coords: !args.without_tex_coords,
                    normals: !args.without_normals,
                    materials: !args.without_materials,
                };
                obj::Writer::new(mesh).with_options(options).write_to_file(&args.target)?;
            }
            FileFormat::Off => off::Writer::new(mesh).write_to_file(&args.target)?,
        }
    });

    Ok(())
}
