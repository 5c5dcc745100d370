//! Tessera CLI
//!
//! Scans, parses and cascades widget stylesheets for debugging themes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser as ClapParser, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tessera_common::{LogConfig, LogFormat, init_logging};
use tessera_css::cascade::{Orientation, TreeNode};
use tessera_css::loader::{LayerPriority, LayeredStyleLoader};
use tessera_css::model::{Declaration, StorageKind, StyleSheet};
use tessera_css::parser::Parser;
use tessera_css::scanner::{Scanner, preprocess};
use tessera_css::tables::PseudoClass;
use tessera_css::values::{
    BorderValues, BoxValues, DeviceProfile, FontValues, GeometryValues, ValueExtractor,
};
use tessera_tree::{Widget, WidgetId, WidgetTree};

/// Tessera - widget stylesheet inspector
#[derive(ClapParser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    tessera tokens theme.css
    tessera parse theme.css --json
    tessera cascade app.css --class PushButton,AbstractButton,Widget --id ok
    tessera cascade app.css --theme theme.css --class Label,Widget --state pressed
    tessera cascade app.css --ancestor Dialog,Widget --class Label,Widget --profile device.json
"#)]
struct Cli {
    /// Log level used when no filter is set in the environment
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scanned symbols of a stylesheet
    Tokens {
        /// Stylesheet to scan
        file: PathBuf,
    },

    /// Parse a stylesheet and summarize its rules
    Parse {
        /// Stylesheet to parse
        file: PathBuf,

        /// Print the parsed sheet as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cascade stylesheets onto a single widget
    Cascade(CascadeArgs),
}

#[derive(Args, Debug)]
struct CascadeArgs {
    /// Application stylesheets, in load order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Core stylesheet; its variables act as defaults (repeatable)
    #[arg(long)]
    core: Vec<PathBuf>,

    /// Theme stylesheet (repeatable)
    #[arg(long)]
    theme: Vec<PathBuf>,

    /// Operator stylesheet (repeatable)
    #[arg(long)]
    operator: Vec<PathBuf>,

    /// Inheritance chain of the widget, most-derived class first
    #[arg(long, value_delimiter = ',', required = true)]
    class: Vec<String>,

    /// Object name of the widget
    #[arg(long)]
    id: Option<String>,

    /// Dynamic property as NAME=VALUE (repeatable)
    #[arg(long = "property", value_parser = parse_property)]
    properties: Vec<(String, String)>,

    /// Inheritance chain of an ancestor, outermost ancestor first (repeatable)
    #[arg(long = "ancestor")]
    ancestors: Vec<String>,

    /// Screen orientation: horizontal or vertical
    #[arg(long, default_value = "horizontal")]
    orientation: Orientation,

    /// Medium that @media rules are matched against
    #[arg(long)]
    medium: Option<String>,

    /// Pseudo-element to query, such as "item"
    #[arg(long)]
    pseudo_element: Option<String>,

    /// Interactive state, as pseudo-class names such as "pressed,focus"
    #[arg(long)]
    state: Option<String>,

    /// JSON device profile giving pixels per un and per millimeter
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_property(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = LogConfig {
        level: cli.log_level,
        ..LogConfig::default()
    }
    .with_format(cli.log_format);
    init_logging(&config)?;

    match &cli.command {
        Command::Tokens { file } => print_tokens(file),
        Command::Parse { file, json } => print_sheet(file, *json),
        Command::Cascade(args) => print_cascade(args),
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn heading(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
}

fn print_tokens(file: &Path) -> Result<()> {
    let css = read(file)?;
    let (text, has_escapes) = preprocess(&css);
    if has_escapes {
        tracing::info!(file = %file.display(), "stylesheet contains escape sequences");
    }
    let mut scanner = Scanner::new(text);
    scanner.run();
    let input = scanner.input().to_vec();

    heading("Symbols");
    for (index, symbol) in scanner.into_symbols().iter().enumerate() {
        let token = symbol.token.to_string();
        println!("{index:>5}  {token:<16} {:?}", symbol.raw(&input));
    }
    Ok(())
}

fn print_sheet(file: &Path, json: bool) -> Result<()> {
    let sheet = Parser::from_file(file)?.parse_sheet(StorageKind::Heap)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&sheet)?);
        return Ok(());
    }
    print_summary(&sheet);
    Ok(())
}

fn print_summary(sheet: &StyleSheet) {
    heading("Style Rules");
    for (name, bucket) in &sheet.widget_rules {
        let screen = if bucket.depends_on_screen {
            " (screen)".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "{}: {} rules, {} portrait, {} landscape{screen}",
            name.cyan(),
            bucket.style_rules.len(),
            bucket.portrait_rules.len(),
            bucket.landscape_rules.len(),
        );
    }
    println!("{} rules total", sheet.style_rule_count());

    if !sheet.variable_rules.is_empty() {
        heading("Variables");
        for decl in sheet.variable_rules.iter().flat_map(|rule| &rule.declarations) {
            print_declaration(decl);
        }
    }

    if !sheet.media_rules.is_empty() {
        heading("Media");
        for rule in &sheet.media_rules {
            println!("{}: {} rules", rule.media.join(", "), rule.style_rules.len());
        }
    }

    if !sheet.page_rules.is_empty() {
        heading("Pages");
        for rule in &sheet.page_rules {
            println!(
                ":{}: {} declarations",
                rule.selector,
                rule.declarations.len()
            );
        }
    }

    if !sheet.import_rules.is_empty() {
        heading("Imports");
        for rule in &sheet.import_rules {
            if rule.media.is_empty() {
                println!("{}", rule.href);
            } else {
                println!("{} ({})", rule.href, rule.media.join(", "));
            }
        }
    }
}

fn print_declaration(decl: &Declaration) {
    let values: Vec<String> = decl.values.iter().map(ToString::to_string).collect();
    let important = if decl.important { " !important" } else { "" };
    println!("{}: {}{important}", decl.property.cyan(), values.join(" "));
}

/// Values extracted from the cascaded declarations of one widget.
#[derive(Debug, Serialize)]
struct CascadeReport {
    declarations: Vec<Declaration>,
    #[serde(rename = "box")]
    box_values: Option<BoxValues>,
    geometry: Option<GeometryValues>,
    border: Option<BorderValues>,
    font: Option<FontValues>,
}

impl CascadeReport {
    fn new(declarations: &[Declaration], extractor: &ValueExtractor<'_>) -> Self {
        Self {
            declarations: declarations.to_vec(),
            box_values: extracted(|values| extractor.extract_box(values)),
            geometry: extracted(|values| extractor.extract_geometry(values)),
            border: extracted(|values| extractor.extract_border(values)),
            font: extracted(|values| extractor.extract_font(values)),
        }
    }

    fn print(&self) {
        heading("Declarations");
        for decl in &self.declarations {
            print_declaration(decl);
        }
        if let Some(values) = &self.box_values {
            heading("Box");
            println!("{values:#?}");
        }
        if let Some(values) = &self.geometry {
            heading("Geometry");
            println!("{values:#?}");
        }
        if let Some(values) = &self.border {
            heading("Border");
            println!("{values:#?}");
        }
        if let Some(values) = &self.font {
            heading("Font");
            println!("{values:#?}");
        }
    }
}

fn extracted<T: Default>(extract: impl FnOnce(&mut T) -> bool) -> Option<T> {
    let mut value = T::default();
    extract(&mut value).then_some(value)
}

fn print_cascade(args: &CascadeArgs) -> Result<()> {
    let mut loader = LayeredStyleLoader::new();
    if let Some(medium) = &args.medium {
        loader.set_medium(medium);
    }
    let layers = [
        (LayerPriority::Core, &args.core),
        (LayerPriority::Theme, &args.theme),
        (LayerPriority::Application, &args.files),
        (LayerPriority::Operator, &args.operator),
    ];
    for (priority, paths) in layers {
        let handles = loader.load_all(paths, priority)?;
        tracing::debug!(layer = %priority, sheets = handles.len(), "layer loaded");
    }

    let profile = match &args.profile {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("invalid device profile {}", path.display()))?,
        None => DeviceProfile::default(),
    };

    let (tree, id) = build_tree(args);
    let node = TreeNode::new(&tree, id);
    let pseudo_element = args.pseudo_element.as_deref();
    let declarations = match &args.state {
        Some(names) => {
            let state = PseudoClass::from_names(names);
            if state.is_empty() {
                bail!("no known pseudo-class in '{names}'");
            }
            loader.declarations_for_state(node, args.orientation, pseudo_element, state)
        }
        None => loader.declarations_for_node(node, args.orientation, pseudo_element),
    };

    let variables = loader.variable_rule_sets();
    let defaults = loader.default_variables();
    let extractor = ValueExtractor::new(&declarations, profile)
        .with_variables(&variables)
        .with_defaults(&defaults);
    let report = CascadeReport::new(&declarations, &extractor);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

/// A chain of ancestors with the queried widget as the innermost child.
fn build_tree(args: &CascadeArgs) -> (WidgetTree, WidgetId) {
    let mut tree = WidgetTree::new();
    let mut parent = None;
    for chain in &args.ancestors {
        let ancestor = Widget::new(chain.split(',').map(str::trim).filter(|c| !c.is_empty()));
        parent = Some(attach(&mut tree, parent, ancestor));
    }

    let mut widget = Widget::new(args.class.iter().cloned());
    if let Some(name) = &args.id {
        widget = widget.with_object_name(name);
    }
    for (name, value) in &args.properties {
        widget = widget.with_property(name, value);
    }
    let id = attach(&mut tree, parent, widget);
    (tree, id)
}

fn attach(tree: &mut WidgetTree, parent: Option<WidgetId>, widget: Widget) -> WidgetId {
    match parent {
        Some(parent) => tree.add_child(parent, widget),
        None => tree.alloc(widget),
    }
}
