use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use easyweights_core::{Scene, SelectionMode, WeightSettings};
use easyweights_io::{load_settings, read_scene, write_scene};
use easyweights_ops::{
    invoke, resolve_selection, CleanVertexGroups, MappedTransfer, Operator, OperatorContext,
    OperatorOutcome, PanelModel, Report, TransferWeights, VertexMapping,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "easyweights", version, about = "Transfer vertex-group weights between meshes and clean unused groups")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene file (.json)
    scene: PathBuf,
    /// Settings file (.toml). Flags override its values.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Object providing the weights
    #[arg(long)]
    source: Option<String>,
    /// Single target object
    #[arg(long, conflicts_with = "collection")]
    target: Option<String>,
    /// Use every mesh of this collection as a target
    #[arg(long)]
    collection: Option<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the scene here instead of overwriting the input
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Run without writing the scene
    #[arg(long)]
    dry_run: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mapping {
    Topology,
    Nearest,
}

impl From<Mapping> for VertexMapping {
    fn from(mapping: Mapping) -> Self {
        match mapping {
            Mapping::Topology => VertexMapping::Topology,
            Mapping::Nearest => VertexMapping::Nearest,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Copy vertex-group weights from the source to the targets
    Transfer {
        #[command(flatten)]
        scene: SceneArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Remove unused vertex groups from each target afterwards
        #[arg(long)]
        clean: bool,
        /// How target vertices are matched to source vertices
        #[arg(long, value_enum, default_value_t = Mapping::Topology)]
        mapping: Mapping,
        /// Use the active object as source and the other selected meshes as targets
        #[arg(long, conflicts_with_all = ["source", "target", "collection"])]
        from_selection: bool,
    },
    /// Remove vertex groups without positive weights from the targets
    Clean {
        #[command(flatten)]
        scene: SceneArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the panel for a scene and settings
    Status {
        #[command(flatten)]
        scene: SceneArgs,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_settings(args: &SceneArgs) -> Result<WeightSettings> {
    let mut settings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => WeightSettings::default(),
    };

    if let Some(source) = &args.source {
        settings.source = Some(source.clone());
    }
    if let Some(target) = &args.target {
        settings.target = Some(target.clone());
        settings.mode = SelectionMode::SingleObject;
    }
    if let Some(collection) = &args.collection {
        settings.targets = Some(collection.clone());
        settings.mode = SelectionMode::Collection;
    }
    Ok(settings)
}

fn load_scene(path: &Path) -> Result<Scene> {
    read_scene(path).with_context(|| format!("failed to read scene {}", path.display()))
}

fn save_scene(scene: &Scene, input: &Path, output: &OutputArgs) -> Result<()> {
    if output.dry_run {
        info!("Dry run, scene not written");
        return Ok(());
    }
    let path = output.output.as_deref().unwrap_or(input);
    write_scene(scene, path).with_context(|| format!("failed to write scene {}", path.display()))?;
    info!("Wrote scene to {}", path.display());
    Ok(())
}

fn run_operator<O: Operator>(operator: &O, scene: &mut Scene, settings: &WeightSettings) -> Result<Vec<Report>> {
    match invoke(operator, &mut OperatorContext::new(scene, settings))? {
        OperatorOutcome::Finished(reports) => Ok(reports),
        OperatorOutcome::Cancelled => bail!(
            "{} is disabled: source or targets are not set",
            O::LABEL
        ),
    }
}

/// Transfer from the active object to every other selected mesh
fn transfer_selection<O: Operator>(operator: &O, scene: &mut Scene, settings: &WeightSettings) -> Result<Vec<Report>> {
    let (source, targets) = resolve_selection(scene)
        .map(|(source, targets)| {
            let targets: Vec<String> = targets.iter().map(|o| o.name.clone()).collect();
            (source.name.clone(), targets)
        })
        .context("no active mesh object to use as source")?;

    if targets.is_empty() {
        return Ok(vec![Report::warning("No other selected meshes to transfer weights to")]);
    }

    let mut reports = Vec::new();
    for target in targets {
        let pair = WeightSettings {
            source: Some(source.clone()),
            target: Some(target),
            mode: SelectionMode::SingleObject,
            ..settings.clone()
        };
        reports.extend(run_operator(operator, scene, &pair)?);
    }
    Ok(reports)
}

fn print_reports(reports: &[Report]) {
    for report in reports {
        println!("{}", report);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Command::Transfer {
            scene: args,
            output,
            clean,
            mapping,
            from_selection,
        } => {
            let mut settings = build_settings(&args)?;
            settings.clean |= clean;
            let mut scene = load_scene(&args.scene)?;
            let operator = TransferWeights::new(MappedTransfer::new(mapping.into()));

            let reports = if from_selection {
                transfer_selection(&operator, &mut scene, &settings)?
            } else {
                run_operator(&operator, &mut scene, &settings)?
            };
            print_reports(&reports);
            save_scene(&scene, &args.scene, &output)
        }
        Command::Clean { scene: args, output } => {
            let settings = build_settings(&args)?;
            let mut scene = load_scene(&args.scene)?;
            let reports = run_operator(&CleanVertexGroups, &mut scene, &settings)?;
            print_reports(&reports);
            save_scene(&scene, &args.scene, &output)
        }
        Command::Status { scene: args } => {
            let settings = build_settings(&args)?;
            let scene = load_scene(&args.scene)?;
            println!("{}", PanelModel::describe(&scene, &settings));
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
