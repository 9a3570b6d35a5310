use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use courselib_db::{seed, InMemoryRepository, SharedRepository};
use courselib_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[derive(Debug, Parser)]
#[command(name = "courselib", version, about = "Authors and courses REST API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until ctrl-c or SIGTERM
    Serve,
    /// Print every module with the path it is mounted under
    Routes,
    /// Print the merged OpenAPI document
    Openapi,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            let settings = Settings::load().context("failed to load settings")?;
            courselib_telemetry::init(&settings.telemetry)?;

            let runtime = tokio::runtime::Runtime::new().context("failed to build tokio runtime")?;
            runtime.block_on(serve(settings))
        }
        Command::Routes => {
            let registry = course_library::registry(empty_repository());
            for module in registry.modules() {
                println!("{}\t{}", module.name(), module.mount_path());
            }
            Ok(())
        }
        Command::Openapi => {
            let registry = course_library::registry(empty_repository());
            let document = courselib_http::router::merged_openapi(&registry);
            println!(
                "{}",
                serde_json::to_string_pretty(&document).context("failed to render OpenAPI")?
            );
            Ok(())
        }
    }
}

fn empty_repository() -> SharedRepository {
    Arc::new(InMemoryRepository::new())
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        address = %settings.bind_address(),
        "course library starting"
    );

    let repository = empty_repository();
    if settings.store.seed_demo_data {
        seed::seed_demo_data(repository.as_ref())
            .await
            .context("failed to seed demo data")?;
    }

    let registry: ModuleRegistry = course_library::registry(repository);
    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = courselib_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    tracing::info!("course library stopped");
    served
}
