use failure::{bail, Error};
use ringmesh::integrity::Severity;

use crate::{
    args::CheckArgs,
    commands::load_mesh,
};


pub fn run(args: &CheckArgs) -> Result<(), Error> {
    let (mesh, _) = load_mesh(&args.source, &args.file)?;
    let report = progress!(["Checking mesh"] => {
        mesh.check_integrity()
    });

    println!();
    println!("{}", report);

    if args.verbose {
        for finding in report.findings() {
            match finding.severity() {
                Severity::Info => info!("{}", finding),
                Severity::Warning => warn!("{}", finding),
                Severity::Fatal => error!("{}", finding),
            }
        }
    }

    if report.is_fatal() {
        bail!("the mesh is inconsistent ({} fatal findings)", report.count(Severity::Fatal));
    }
    if !report.is_clean() {
        warn!("{} warning(s), see above", report.count(Severity::Warning));
    }

    Ok(())
}
