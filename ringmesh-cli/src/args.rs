//! Defines `Args` which is used to parse command line arguments.

use structopt::StructOpt;
use ringmesh::io::FileFormat;


#[derive(StructOpt, Debug)]
#[structopt(raw(setting = "structopt::clap::AppSettings::VersionlessSubcommands"))]
pub struct Args {
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Print element counts, extra data and materials of a mesh file.
    #[structopt(name = "info")]
    Info {
        #[structopt(flatten)]
        args: InfoArgs,
    },

    /// Check a mesh file for topological problems. Exits with a non-zero
    /// code if the mesh is inconsistent.
    #[structopt(name = "check")]
    Check {
        #[structopt(flatten)]
        args: CheckArgs,
    },

    /// Converts a mesh from one file format into another one.
    #[structopt(name = "convert")]
    Convert {
        #[structopt(flatten)]
        args: ConvertArgs,
    },
}

/// Arguments to load the source mesh, shared by all commands.
#[derive(StructOpt, Debug)]
pub struct SourceArgs {
    /// Explicitly specify the source file format (otherwise it's guessed from
    /// the extension and file start). Valid values: obj, off.
    #[structopt(
        long = "--source-format",
        parse(try_from_str = "parse_file_format"),
    )]
    pub source_format: Option<FileFormat>,

    /// Merge OBJ vertices with bit-identical positions while loading.
    #[structopt(long = "--unify-vertices")]
    pub unify_vertices: bool,
}

#[derive(StructOpt, Debug)]
pub struct InfoArgs {
    #[structopt(flatten)]
    pub source: SourceArgs,

    /// Path to the mesh file.
    pub file: String,
}

#[derive(StructOpt, Debug)]
pub struct CheckArgs {
    #[structopt(flatten)]
    pub source: SourceArgs,

    /// Print every single finding instead of just the summary.
    #[structopt(short = "-v", long = "--verbose")]
    pub verbose: bool,

    /// Path to the mesh file.
    pub file: String,
}

#[derive(StructOpt, Debug)]
pub struct ConvertArgs {
    #[structopt(flatten)]
    pub source_args: SourceArgs,

    /// Explicitly specify the target file format (otherwise it's guessed from
    /// the extension). Valid values: obj, off.
    #[structopt(
        short = "-f",
        long = "--target-format",
        parse(try_from_str = "parse_file_format"),
    )]
    pub target_format: Option<FileFormat>,

    /// Path to the source mesh file.
    pub source: String,

    /// Path to the target mesh file. The target format is guessed from the
    /// extension given here.
    pub target: String,

    /// If set, texture coordinates won't be written in the target mesh.
    #[structopt(long = "--without-tex-coords")]
    pub without_tex_coords: bool,

    /// If set, vertex normals won't be written in the target mesh.
    #[structopt(long = "--without-normals")]
    pub without_normals: bool,

    /// If set, materials won't be written in the target mesh.
    #[structopt(long = "--without-materials")]
    pub without_materials: bool,

    /// Compute smooth vertex normals before writing. Replaces normals read
    /// from the source file.
    #[structopt(long = "--compute-normals")]
    pub compute_normals: bool,
}

fn parse_file_format(src: &str) -> Result<FileFormat, String> {
    match src.to_ascii_lowercase().as_str() {
        "obj" => Ok(FileFormat::Obj),
        "off" => Ok(FileFormat::Off),
        other => Err(format!("'{}' is currently not an accepted file format", other)),
    }
}
