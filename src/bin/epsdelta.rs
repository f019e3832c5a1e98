//! Command-line front end for the continuity calculator
//!
//! Searches for a delta at a point, sweeps epsilons, samples display curves
//! and lists the function library.

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};
use epsilon_delta::ast::NameCollector;
use epsilon_delta::parser::tokenizer::Tokenizer;
use epsilon_delta::{
    Calculator, CalculatorConfig, ContinuityReport, DisplayDomain, EpsilonGrid, Evaluation,
    OutputFormat, PRESETS, PolicyKind, SampledCurve, SweepTable, Verdict, find_preset,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "epsdelta")]
#[command(about = "Numerically explore the epsilon-delta definition of continuity")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (defaults to the configured format, then pretty)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Read configuration from this file instead of the standard locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a delta at a point for one epsilon
    Search {
        #[command(flatten)]
        expression: ExpressionArgs,
        /// The point a
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        point: f64,
        /// The tolerance epsilon
        #[arg(short, long)]
        epsilon: f64,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Include the sampled display curve in JSON output
        #[arg(long)]
        with_curve: bool,
    },
    /// Search for a delta over a grid of epsilons
    Sweep {
        #[command(flatten)]
        expression: ExpressionArgs,
        /// The point a
        #[arg(short = 'a', long, allow_negative_numbers = true)]
        point: f64,
        /// Smallest epsilon
        #[arg(long)]
        from: Option<f64>,
        /// Largest epsilon
        #[arg(long)]
        to: Option<f64>,
        /// Number of epsilons
        #[arg(long)]
        steps: Option<usize>,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Sample the function for plotting (CSV, or JSON with --format json)
    Curve {
        #[command(flatten)]
        expression: ExpressionArgs,
        /// Centre of the display domain
        #[arg(short = 'a', long, allow_negative_numbers = true, default_value_t = 0.0)]
        point: f64,
        /// Left edge of the domain
        #[arg(long, allow_negative_numbers = true, requires = "to")]
        from: Option<f64>,
        /// Right edge of the domain
        #[arg(long, allow_negative_numbers = true, requires = "from")]
        to: Option<f64>,
        /// Number of samples
        #[arg(long)]
        count: Option<usize>,
    },
    /// Evaluate the function at one or more points
    Eval {
        #[command(flatten)]
        expression: ExpressionArgs,
        /// Points to evaluate at
        #[arg(long = "at", short = 'x', num_args = 1.., required = true, allow_negative_numbers = true)]
        xs: Vec<f64>,
    },
    /// Check an expression without evaluating it
    Validate {
        #[command(flatten)]
        expression: ExpressionArgs,
    },
    /// List the functions and constants expressions may use
    Functions,
    /// List the built-in example functions
    Presets,
    /// Show configuration
    Config {
        /// Print a commented sample configuration file
        #[arg(long)]
        sample: bool,
        /// Write the effective configuration to the default file in the home directory
        #[arg(long, conflicts_with = "sample")]
        init: bool,
    },
}

#[derive(Args)]
struct ExpressionArgs {
    /// Expression in x, e.g. "x**2" or "np.sin(x)"
    #[arg(required_unless_present = "preset")]
    expression: Option<String>,
    /// Use a built-in example instead of an expression
    #[arg(long, conflicts_with = "expression")]
    preset: Option<String>,
}

impl ExpressionArgs {
    fn resolve(&self) -> anyhow::Result<String> {
        match (&self.expression, &self.preset) {
            (Some(expression), _) => Ok(expression.clone()),
            (None, Some(name)) => find_preset(name)
                .map(|preset| preset.expression.to_string())
                .ok_or_else(|| anyhow!("unknown preset '{name}', see `epsdelta presets`")),
            (None, None) => Err(anyhow!("an expression or --preset is required")),
        }
    }
}

#[derive(Args)]
struct PolicyArgs {
    /// Candidate policy (bounded, fixed)
    #[arg(long)]
    policy: Option<PolicyKind>,
    /// Number of candidate deltas
    #[arg(long)]
    candidates: Option<usize>,
    /// Samples on each side of the point
    #[arg(long)]
    samples: Option<usize>,
    /// Smallest candidate of the fixed policy
    #[arg(long)]
    min_delta: Option<f64>,
    /// Largest candidate of the fixed policy
    #[arg(long)]
    max_delta: Option<f64>,
}

impl PolicyArgs {
    /// Command-line values take precedence over the configuration
    fn apply(&self, config: &mut CalculatorConfig) {
        if let Some(kind) = self.policy {
            config.policy = kind;
        }
        if self.candidates.is_some() {
            config.candidates = self.candidates;
        }
        if self.samples.is_some() {
            config.samples_per_side = self.samples;
        }
        if let Some(min_delta) = self.min_delta {
            config.min_delta = min_delta;
        }
        if let Some(max_delta) = self.max_delta {
            config.max_delta = max_delta;
        }
        if config.policy == PolicyKind::Bounded
            && (self.min_delta.is_some() || self.max_delta.is_some())
        {
            log::warn!("--min-delta and --max-delta only apply to the fixed policy");
        }
    }
}

/// Terminal output settings
struct Printer {
    format: OutputFormat,
    colored: bool,
    quiet: bool,
}

impl Printer {
    fn colorize(&self, text: &str, color: colored::Color) -> String {
        if self.colored {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn success_icon(&self) -> &'static str {
        if self.colored { "✅" } else { "[OK]" }
    }

    fn error_icon(&self) -> &'static str {
        if self.colored { "❌" } else { "[ERROR]" }
    }

    fn warning_icon(&self) -> &'static str {
        if self.colored { "⚠️" } else { "[WARNING]" }
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    fn json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table
    }
}

fn main() {
    // Setup human-panic for better error messages
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    let verbose = cli.verbose || config.verbose;
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let printer = Printer {
        format: cli.format.or(config.output_format).unwrap_or_default(),
        colored: !(cli.no_color || config.no_color),
        quiet: cli.quiet || config.quiet,
    };

    if let Err(e) = run(cli.command, config, &printer) {
        eprintln!("{} {e:#}", printer.error_icon());
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CalculatorConfig> {
    match &cli.config {
        Some(path) => CalculatorConfig::load_from_file(path)
            .with_context(|| format!("cannot read {}", path.display())),
        None => CalculatorConfig::load(),
    }
}

fn run(command: Commands, mut config: CalculatorConfig, printer: &Printer) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            expression,
            point,
            epsilon,
            policy,
            with_curve,
        } => {
            policy.apply(&mut config);
            let expression = expression.resolve()?;
            let report = config.calculator()?.analyze(&expression, point, epsilon)?;
            handle_search(&report, with_curve, printer)
        }
        Commands::Sweep {
            expression,
            point,
            from,
            to,
            steps,
            policy,
        } => {
            policy.apply(&mut config);
            let grid = EpsilonGrid::new(
                from.unwrap_or(config.sweep.from),
                to.unwrap_or(config.sweep.to),
                steps.unwrap_or(config.sweep.steps),
            );
            let expression = expression.resolve()?;
            let table = config.calculator()?.sweep(&expression, point, &grid)?;
            handle_sweep(&expression, &table, printer)
        }
        Commands::Curve {
            expression,
            point,
            from,
            to,
            count,
        } => {
            let domain = match (from, to) {
                (Some(from), Some(to)) => DisplayDomain::new(from, to)?,
                _ => config.curve.domain(point)?,
            };
            let expression = expression.resolve()?;
            let curve = config.calculator()?.curve(
                &expression,
                domain,
                count.unwrap_or(config.curve.points),
            )?;
            handle_curve(&curve, printer)
        }
        Commands::Eval { expression, xs } => {
            let expression = expression.resolve()?;
            handle_eval(&expression, &xs, &config, printer)
        }
        Commands::Validate { expression } => {
            let expression = expression.resolve()?;
            handle_validate(&expression, &config, printer)
        }
        Commands::Functions => handle_functions(printer),
        Commands::Presets => handle_presets(printer),
        Commands::Config { sample, init } => handle_config(&config, sample, init, printer),
    }
}

fn handle_search(
    report: &ContinuityReport,
    with_curve: bool,
    printer: &Printer,
) -> anyhow::Result<()> {
    if printer.format == OutputFormat::Json {
        let mut value = serde_json::to_value(report)?;
        if !with_curve && let Some(object) = value.as_object_mut() {
            object.remove("curve");
        }
        if let Some(object) = value.as_object_mut() {
            object.insert("verdict".to_string(), serde_json::to_value(report.verdict())?);
        }
        return printer.json(&value);
    }

    printer.info(&format!(
        "Expression: {}",
        printer.colorize(&report.expression, colored::Color::Blue)
    ));
    printer.info(&format!("Policy: {}", report.policy));
    printer.info(&format!("f({}) = {}", report.point, report.f_at_point));

    match (report.delta.delta(), report.neighborhood) {
        (Some(delta), Some((low, high))) => {
            println!(
                "{} suitable δ: {}",
                printer.success_icon(),
                printer.colorize(&format!("{delta:.6}"), colored::Color::Green)
            );
            printer.info(&format!(
                "   for all x ∈ ({low:.3}, {high:.3}), |f(x) - f(a)| < {}",
                report.epsilon
            ));
        }
        _ => {
            println!(
                "{} no δ found for ε = {}; check the function or the inputs",
                printer.error_icon(),
                report.epsilon
            );
        }
    }

    let verdict = format!(
        "f {} at x = {} for ε = {}",
        report.verdict(),
        report.point,
        report.epsilon
    );
    match report.verdict() {
        Verdict::Continuous => printer.info(&format!(
            "{} {}",
            printer.success_icon(),
            printer.colorize(&verdict, colored::Color::Green)
        )),
        Verdict::PossiblyDiscontinuous => println!(
            "{} {}",
            printer.warning_icon(),
            printer.colorize(&verdict, colored::Color::Yellow)
        ),
    }

    let curve = &report.curve;
    printer.info(&format!(
        "Curve: {} samples over [{}, {}], {} undefined",
        curve.len(),
        curve.domain.start(),
        curve.domain.end(),
        curve.undefined_xs().len()
    ));
    if let Some((low, high)) = curve.y_range() {
        printer.info(&format!("   y-range [{low:.4}, {high:.4}]"));
    }
    Ok(())
}

fn handle_sweep(expression: &str, table: &SweepTable, printer: &Printer) -> anyhow::Result<()> {
    if printer.format == OutputFormat::Json {
        return printer.json(table);
    }

    printer.info(&format!(
        "Expression: {} at a = {}",
        printer.colorize(expression, colored::Color::Blue),
        table.point
    ));

    let mut output = printer.table();
    output.set_header(vec!["ε", "δ", "Neighborhood"]);
    for row in &table.rows {
        let (delta, neighborhood) = match row.delta {
            Some(delta) => (
                format!("{delta:.6}"),
                format!("({:.4}, {:.4})", table.point - delta, table.point + delta),
            ),
            None => ("-".to_string(), "not found".to_string()),
        };
        output.add_row(vec![format!("{:.4}", row.epsilon), delta, neighborhood]);
    }
    println!("{output}");
    printer.info(&format!(
        "{} of {} epsilons have a δ",
        table.found_count(),
        table.len()
    ));
    Ok(())
}

fn handle_curve(curve: &SampledCurve, printer: &Printer) -> anyhow::Result<()> {
    if printer.format == OutputFormat::Json {
        return printer.json(curve);
    }

    println!("x,y");
    for point in &curve.points {
        match point.y {
            Evaluation::Finite(y) => println!("{},{y}", point.x),
            Evaluation::Undefined => println!("{},", point.x),
        }
    }
    Ok(())
}

fn handle_eval(
    expression: &str,
    xs: &[f64],
    config: &CalculatorConfig,
    printer: &Printer,
) -> anyhow::Result<()> {
    let compiled = config.calculator()?.compile(expression)?;
    let values = compiled.evaluate_many(xs);

    if printer.format == OutputFormat::Json {
        let rows: Vec<_> = xs
            .iter()
            .zip(&values)
            .map(|(x, y)| serde_json::json!({ "x": x, "y": y }))
            .collect();
        return printer.json(&rows);
    }

    let mut output = printer.table();
    output.set_header(vec!["x".to_string(), format!("f(x) = {expression}")]);
    for (x, y) in xs.iter().zip(&values) {
        let shown = match y {
            Evaluation::Finite(_) => y.to_string(),
            Evaluation::Undefined => printer.colorize("undefined", colored::Color::Red),
        };
        output.add_row(vec![x.to_string(), shown]);
    }
    println!("{output}");
    Ok(())
}

fn handle_validate(
    expression: &str,
    config: &CalculatorConfig,
    printer: &Printer,
) -> anyhow::Result<()> {
    let mut calculator: Calculator = config.calculator()?;
    let compiled = match calculator.compile(expression) {
        Ok(compiled) => compiled,
        Err(e) => {
            if printer.format == OutputFormat::Json {
                printer.json(&serde_json::json!({
                    "valid": false,
                    "expression": expression,
                    "error": e.to_string(),
                }))?;
                process::exit(1);
            }
            return Err(e.into());
        }
    };

    let tokens = Tokenizer::new(expression).tokenize_all()?;
    let names = NameCollector::collect(compiled.ast());
    if printer.format == OutputFormat::Json {
        return printer.json(&serde_json::json!({
            "valid": true,
            "expression": expression,
            "tokens": tokens.len(),
            "canonical": compiled.ast().to_string(),
            "identifiers": names.identifiers,
            "functions": names.functions,
        }));
    }

    println!("{} valid expression", printer.success_icon());
    printer.info(&format!(
        "   parsed as {} ({} tokens)",
        compiled.ast(),
        tokens.len()
    ));
    if !names.functions.is_empty() {
        printer.info(&format!("   functions: {}", names.functions.join(", ")));
    }
    if !names.identifiers.is_empty() {
        printer.info(&format!("   names: {}", names.identifiers.join(", ")));
    }
    Ok(())
}

fn handle_functions(printer: &Printer) -> anyhow::Result<()> {
    let registry = epsilon_delta::standard_registry();

    if printer.format == OutputFormat::Json {
        let functions: Vec<_> = registry
            .functions()
            .into_iter()
            .map(|(name, function)| {
                serde_json::json!({
                    "name": name,
                    "signature": function.signature().to_string(),
                    "documentation": function.documentation(),
                })
            })
            .collect();
        return printer.json(&serde_json::json!({
            "functions": functions,
            "constants": registry.constants(),
        }));
    }

    let mut output = printer.table();
    output.set_header(vec!["Name", "Signature", "Description"]);
    for (name, function) in registry.functions() {
        output.add_row(vec![
            name.to_string(),
            function.signature().to_string(),
            function.documentation().to_string(),
        ]);
    }
    for constant in registry.constants() {
        output.add_row(vec![
            constant.name.clone(),
            constant.value.to_string(),
            constant.documentation.clone(),
        ]);
    }
    println!("{output}");
    printer.info("Prefixes np. and math. are accepted, e.g. np.sin(x) or math.pi");
    Ok(())
}

fn handle_presets(printer: &Printer) -> anyhow::Result<()> {
    if printer.format == OutputFormat::Json {
        return printer.json(&PRESETS);
    }

    let mut output = printer.table();
    output.set_header(vec!["Preset", "Function", "Expression", "Notes"]);
    for preset in PRESETS {
        output.add_row(vec![
            preset.name,
            preset.label,
            preset.expression,
            preset.description,
        ]);
    }
    println!("{output}");
    printer.info("Use one with --preset <name>");
    Ok(())
}

fn handle_config(
    config: &CalculatorConfig,
    sample: bool,
    init: bool,
    printer: &Printer,
) -> anyhow::Result<()> {
    if init {
        let path = CalculatorConfig::default_path()
            .ok_or_else(|| anyhow!("no home directory to write the configuration to"))?;
        config.create_file(&path)?;
        println!("{} wrote {}", printer.success_icon(), path.display());
        return Ok(());
    }
    if sample {
        print!("{}", CalculatorConfig::sample_config());
        return Ok(());
    }

    println!("# searched, in order:");
    for path in CalculatorConfig::search_paths() {
        let marker = if path.exists() { "found" } else { "missing" };
        println!("#   {} ({marker})", path.display());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
