//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `georoute` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting and artifact file writing
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use georoute::config::{LogFormat, LogLevel, DEFAULT_DB_PATH};
use georoute::initialization::init_logger_with;
use georoute::{
    import_dataset, init_db_pool_with_path, run_migrations, CidrGenerator, CreateGroupRequest,
    GroupStore, Origin, Region, RegionCatalog, UpdateGroupRequest,
};

#[derive(Parser)]
#[command(
    name = "georoute",
    version,
    about = "Assigns geographic IP space to routing groups and generates per-group CIDR lists"
)]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Log level
    #[arg(long, global = true, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, global = true, value_enum, default_value = "plain")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import the vendor IP geolocation dataset (TSV), replacing the
    /// current reference data
    Import {
        /// Path to the vendor TSV file
        file: PathBuf,
    },

    /// List regions for the target country with their ownership
    Regions {
        /// Origin to report ownership for; omitting it merges all origins
        #[arg(long, value_enum)]
        origin: Option<Origin>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List carriers present in the dataset, largest first
    Isps,

    /// List routing groups
    Groups {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Create a routing group and assign it regions
    Create {
        /// Group name (also the output file name)
        #[arg(long)]
        name: String,

        /// Carrier filter; omit to match any carrier
        #[arg(long, default_value = "")]
        isp: String,

        /// Origin the group launches from
        #[arg(long, value_enum)]
        origin: Origin,

        /// Region to assign, as "Province" or "Province/City"; repeatable
        #[arg(long = "region", required = true)]
        regions: Vec<String>,
    },

    /// Update a group's name, carrier filter and region set
    Update {
        /// Id of the group to update
        id: String,

        /// New group name
        #[arg(long)]
        name: String,

        /// New carrier filter; omit to match any carrier
        #[arg(long, default_value = "")]
        isp: String,

        /// Replacement region set; repeatable
        #[arg(long = "region")]
        regions: Vec<String>,
    },

    /// Delete a routing group, freeing its regions
    Delete {
        /// Id of the group to delete
        id: String,
    },

    /// Generate CIDR files for all groups (or one group)
    Generate {
        /// Generate for a single group id instead of all groups
        #[arg(long)]
        group: Option<String>,

        /// Directory the .txt files are written into
        #[arg(long, default_value = "./cidr-out")]
        out: PathBuf,
    },

    /// Print dataset and group statistics
    Stats,
}

/// Parses a CLI region argument: "Province" or "Province/City".
fn parse_region_arg(arg: &str) -> Result<Region> {
    let (province, city) = match arg.split_once('/') {
        Some((province, city)) => (province.trim(), city.trim()),
        None => (arg.trim(), ""),
    };
    if province.is_empty() {
        bail!("invalid region {arg:?}: expected \"Province\" or \"Province/City\"");
    }
    Ok(Region::new(province, city))
}

fn parse_region_args(args: &[String]) -> Result<Vec<Region>> {
    args.iter().map(|a| parse_region_arg(a)).collect()
}

fn print_group(group: &georoute::RouteGroup) {
    let isp = if group.isp.is_empty() {
        "any carrier"
    } else {
        group.isp.as_str()
    };
    println!(
        "{}  {}  [{}] {} ({} regions)",
        group.id, group.name, group.origin, isp, group.regions.len()
    );
    for region in &group.regions {
        println!("    {region}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let pool = init_db_pool_with_path(&cli.db)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Command::Import { file } => {
            let report = import_dataset(&pool, &file).await?;
            println!(
                "Imported {} records in {:.1}s ({} skipped)",
                report.imported, report.elapsed_seconds, report.skipped
            );
        }

        Command::Regions { origin, json } => {
            let regions = RegionCatalog::new(pool).list_regions(origin).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&regions)?);
            } else {
                for region in &regions {
                    let owner = region.assigned_to.as_deref().unwrap_or("-");
                    let city = if region.city.is_empty() {
                        "*"
                    } else {
                        region.city.as_str()
                    };
                    println!("{}\t{}\t{}", region.province, city, owner);
                }
                println!("{} regions", regions.len());
            }
        }

        Command::Isps => {
            for isp in RegionCatalog::new(pool).list_isps().await? {
                println!("{isp}");
            }
        }

        Command::Groups { json } => {
            let groups = GroupStore::new(pool).list_all().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                for group in &groups {
                    print_group(group);
                }
                println!("{} groups", groups.len());
            }
        }

        Command::Create {
            name,
            isp,
            origin,
            regions,
        } => {
            let regions = parse_region_args(&regions)?;
            let group = GroupStore::new(pool)
                .create(CreateGroupRequest {
                    name,
                    isp,
                    origin,
                    regions,
                })
                .await?;
            println!("Created group {} ({})", group.name, group.id);
        }

        Command::Update {
            id,
            name,
            isp,
            regions,
        } => {
            let regions = parse_region_args(&regions)?;
            let group = GroupStore::new(pool)
                .update(&id, UpdateGroupRequest { name, isp, regions })
                .await?;
            println!("Updated group {} ({})", group.name, group.id);
        }

        Command::Delete { id } => {
            GroupStore::new(pool).delete(&id).await?;
            println!("Deleted group {id}");
        }

        Command::Generate { group, out } => {
            let generator = CidrGenerator::new(Arc::clone(&pool));
            let artifacts = match group {
                Some(id) => {
                    let group = GroupStore::new(pool)
                        .get(&id)
                        .await?
                        .ok_or_else(|| georoute::GroupError::NotFound(id.clone()))?;
                    let cidrs = generator.generate_for_group(&id).await?;
                    vec![georoute::GroupArtifact {
                        group_name: group.name,
                        content: cidrs.join("\n"),
                    }]
                }
                None => generator.generate_all().await?,
            };

            std::fs::create_dir_all(&out)
                .with_context(|| format!("Failed to create output directory {}", out.display()))?;
            for artifact in &artifacts {
                let path = out.join(format!("{}.txt", artifact.group_name));
                std::fs::write(&path, &artifact.content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let lines = if artifact.content.is_empty() {
                    0
                } else {
                    artifact.content.lines().count()
                };
                println!("{} ({} CIDRs)", path.display(), lines);
            }
            println!("Wrote {} file(s) to {}", artifacts.len(), out.display());
        }

        Command::Stats => {
            let stats = RegionCatalog::new(pool).stats().await?;
            println!("Reference records: {}", stats.total_records);
            println!("Target-country records: {}", stats.country_records);
            println!("Routing groups: {}", stats.group_count);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("georoute error: {:#}", e);
            process::exit(1);
        }
    }
}
