use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, LevelFilter};
use loomview_charts::dict_to_json;
use loomview_reader::{
    extract_attr_keys, extract_attrs, get_ca, get_ca_unique, get_classes_with_config, get_ra,
    get_ra_unique, get_shape, json_component_with_config, json_scatter_with_config, ChartConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Chart JSON and metadata from single-cell stores", long_about = None)]
struct Cli {
    /// Log filter passed to env_logger (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pie or bar chart of one or two column attributes
    Component(ComponentArgs),
    /// Embedding scatter plot
    Scatter(ScatterArgs),
    /// Matrix shape as [rows, cols]
    Shape(StoreArg),
    /// Declared class labels
    Classes(ClassesArgs),
    /// Row and column attribute keys
    Keys(KeysArgs),
    /// Values of one row attribute
    RowAttr(AttrArgs),
    /// Values of one column attribute
    ColAttr(AttrArgs),
}

#[derive(Args, Debug)]
struct StoreArg {
    /// Store path (.loom or .json)
    path: PathBuf,
}

#[derive(Args, Debug)]
struct ComponentArgs {
    path: PathBuf,
    /// Chart style: pie or bar
    #[arg(short, long, default_value = "pie")]
    style: String,
    /// Column attribute to count; give twice for a nested chart.
    /// Defaults to the first declared class.
    #[arg(short, long = "attr")]
    attrs: Vec<String>,
    /// Pie hole fraction
    #[arg(long)]
    hole: Option<f64>,
    /// File attribute listing the classes
    #[arg(long, default_value = "Classes")]
    classes_attribute: String,
}

#[derive(Args, Debug)]
struct ScatterArgs {
    path: PathBuf,
    /// Gene symbol or column attribute to color by
    #[arg(short, long)]
    color: Option<String>,
    /// Colorscale for continuous colors
    #[arg(long)]
    colorscale: Option<String>,
    #[arg(long, default_value = "X")]
    x_key: String,
    #[arg(long, default_value = "Y")]
    y_key: String,
}

#[derive(Args, Debug)]
struct ClassesArgs {
    path: PathBuf,
    #[arg(long, default_value = "Classes")]
    classes_attribute: String,
}

#[derive(Args, Debug)]
struct KeysArgs {
    path: PathBuf,
    /// Also print every column attribute and the gene identifiers
    #[arg(long)]
    values: bool,
}

#[derive(Args, Debug)]
struct AttrArgs {
    path: PathBuf,
    key: String,
    /// Print the ascending unique values only
    #[arg(short, long)]
    unique: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = cli.log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Warning: invalid log level '{}', using warn", cli.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::new().filter_level(level).init();
    debug!("{:?}", cli.command);

    let output = run(cli.command)?;
    println!("{}", output);
    Ok(())
}

fn run(command: Command) -> Result<String> {
    let json = match command {
        Command::Component(args) => {
            let mut config = ChartConfig {
                classes_attribute: args.classes_attribute,
                ..ChartConfig::default()
            };
            if let Some(hole) = args.hole {
                config.pie_hole = hole;
            }
            let attrs = if args.attrs.is_empty() {
                default_attrs(&args.path, &config)?
            } else {
                args.attrs
            };
            let value = json_component_with_config(&args.path, &args.style, &attrs, &config)
                .with_context(|| format!("building {} chart", args.style))?;
            dict_to_json(&value)?
        }
        Command::Scatter(args) => {
            let mut config = ChartConfig {
                x_key: args.x_key,
                y_key: args.y_key,
                ..ChartConfig::default()
            };
            if let Some(colorscale) = args.colorscale {
                config.colorscale = colorscale;
            }
            let value = json_scatter_with_config(&args.path, args.color.as_deref(), &config)
                .context("building scatter chart")?;
            dict_to_json(&value)?
        }
        Command::Shape(args) => dict_to_json(&get_shape(&args.path)?)?,
        Command::Classes(args) => {
            let config = ChartConfig {
                classes_attribute: args.classes_attribute,
                ..ChartConfig::default()
            };
            dict_to_json(&get_classes_with_config(&args.path, &config)?)?
        }
        Command::Keys(args) if args.values => dict_to_json(&extract_attrs(&args.path)?)?,
        Command::Keys(args) => dict_to_json(&extract_attr_keys(&args.path)?)?,
        Command::RowAttr(args) if args.unique => {
            dict_to_json(&get_ra_unique(&args.path, &args.key)?)?
        }
        Command::RowAttr(args) => dict_to_json(&get_ra(&args.path, &args.key)?)?,
        Command::ColAttr(args) if args.unique => {
            dict_to_json(&get_ca_unique(&args.path, &args.key)?)?
        }
        Command::ColAttr(args) => dict_to_json(&get_ca(&args.path, &args.key)?)?,
    };
    Ok(json)
}

/// First declared class, for charts requested without attributes.
fn default_attrs(path: &Path, config: &ChartConfig) -> Result<Vec<String>> {
    let classes = get_classes_with_config(path, config)
        .context("no --attr given and the store declares no classes")?;
    match classes.into_iter().next() {
        Some(first) => Ok(vec![first]),
        None => bail!("no --attr given and the store's class list is empty"),
    }
}
