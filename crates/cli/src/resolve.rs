use crate::{OutputFormat, ResolveArgs};
use classpack_core::{
    ClassDependencyResolver, DeploymentCollection, JsonGraphProvider, ResolverConfig,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Serialize)]
struct ResolveReport {
    deployment: DeploymentCollection,
    paths: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workspace: Option<PathBuf>,
}

pub fn run(
    args: ResolveArgs,
    mut config: ResolverConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = args.temp_dir {
        config.archive.temp_root = Some(dir);
    }

    let provider = JsonGraphProvider::new(&args.graph);
    info!(
        "Resolving {} root(s) against {}",
        args.roots.len(),
        args.graph.display()
    );

    let resolution = ClassDependencyResolver::new()
        .with_config(config)
        .with_classes(args.roots)
        .excluding(args.exclusions)
        .process(&provider, args.archive_dirs)?;

    let deployment = DeploymentCollection::from_resolution(args.name, &resolution)?;
    let paths = deployment.paths();

    // Printed paths must stay valid after we exit.
    let (_, workspace) = resolution.persist();
    if let Some(dir) = &workspace {
        info!("Archives written to {}", dir.display());
    }

    match args.format {
        OutputFormat::Text => {
            for path in &paths {
                println!("{path}");
            }
        }
        OutputFormat::Json => {
            let report = ResolveReport {
                deployment,
                paths,
                workspace,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
