//! Command handlers.

use crate::cli::{Commands, InputArgs, OutputArgs};
use anyhow::{Context, Result};
use controller_coder::{
    Artifact, ArtifactSet, CommandRunner, ControllerCoder, GenerationOutcome, ModelGateway,
};

/// Execute one command against the service.
pub async fn run_command<G, R>(coder: &ControllerCoder<G, R>, command: Commands) -> Result<()>
where
    G: ModelGateway,
    R: CommandRunner,
{
    match command {
        Commands::ResourceType { input, output } => {
            let (sql_schema, state_machine) = read_inputs(&input)?;
            let artifact = coder
                .generate_resource_type_file(&sql_schema, &state_machine)
                .await?;
            emit_artifact(coder, &artifact, &output).await
        }

        Commands::StorageInterface {
            resource_name,
            output,
        } => {
            let artifact = coder.generate_storage_interface_file(&resource_name).await?;
            emit_artifact(coder, &artifact, &output).await
        }

        Commands::StorageImpl {
            resource_name,
            output,
        } => {
            let artifact = coder.generate_storage_impl_file(&resource_name).await?;
            emit_artifact(coder, &artifact, &output).await
        }

        Commands::Generate {
            input,
            output,
            create_branch,
        } => {
            let (sql_schema, state_machine) = read_inputs(&input)?;
            let outcome = coder
                .generate_controller(&sql_schema, &state_machine, create_branch)
                .await?;

            if output.write && !create_branch {
                coder.write_artifacts(outcome.artifacts()).await?;
            }

            if output.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_set(outcome.artifacts());
                if let GenerationOutcome::Committed { branch_name, .. } = &outcome {
                    println!("branch: {}", branch_name);
                }
            }
            Ok(())
        }
    }
}

fn read_inputs(input: &InputArgs) -> Result<(String, String)> {
    let sql_schema = std::fs::read_to_string(&input.sql_schema)
        .with_context(|| format!("reading {}", input.sql_schema.display()))?;
    let state_machine = std::fs::read_to_string(&input.state_machine)
        .with_context(|| format!("reading {}", input.state_machine.display()))?;
    Ok((sql_schema, state_machine))
}

async fn emit_artifact<G, R>(
    coder: &ControllerCoder<G, R>,
    artifact: &Artifact,
    output: &OutputArgs,
) -> Result<()>
where
    G: ModelGateway,
    R: CommandRunner,
{
    if output.write {
        coder.write_artifact(artifact).await?;
    }
    if output.json {
        println!("{}", serde_json::to_string_pretty(artifact)?);
    } else {
        print_artifact(artifact);
    }
    Ok(())
}

fn print_set(artifacts: &ArtifactSet) {
    for artifact in artifacts {
        print_artifact(artifact);
    }
}

fn print_artifact(artifact: &Artifact) {
    println!("==> {} <==", artifact.path().display());
    println!("{}", artifact.content());
}
