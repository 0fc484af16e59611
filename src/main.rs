use anyhow::Context as _;
use dessert::{
    Configuration, Extractor,
    report::{self, Page},
};
use rayon::prelude::*;
use std::{
    fs::File,
    io::{self, BufWriter, Read as _, Write},
    path::Path,
};

/// Command-line options.
struct Options {
    /// Extractor configuration.
    config: Configuration,
    /// Inputs are bare argument text instead of whole pages.
    raw: bool,
    /// Write JSON instead of text.
    json: bool,
    /// The output file. Standard output is used if this is not set.
    output: Option<String>,
    /// Input files. `-` is standard input.
    inputs: Vec<String>,
}

fn usage<T>(err: &'static str) -> anyhow::Result<T> {
    let exe = std::env::args().next().unwrap_or_default();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Usage: {exe} [options] <page.wiki>...\n");
    println!("Use - to read a page from standard input.\n");
    println!("Options:");
    println!("    --argument <name>: Infobox argument holding the ingredients");
    println!("                       (default: main_ingredient)");
    println!("    --infobox <name>: Additional infobox to search (repeatable)");
    println!("    --raw: Inputs contain only the ingredient argument text");
    println!("    --json: Write JSON instead of text");
    println!("    --output <file>: Write to a file instead of standard output\n");
    println!("or, use environment variables:");
    println!("    DESSERT_ARGUMENT");
    println!("    DESSERT_OUTPUT\n");
    Err(anyhow::Error::msg(err))
}

fn opt_value(
    args: &mut pico_args::Arguments,
    key: &'static str,
    var: &str,
) -> anyhow::Result<Option<String>> {
    Ok(args
        .opt_value_from_str::<_, String>(key)?
        .or_else(|| std::env::var(var).ok()))
}

fn parse_args() -> anyhow::Result<Options> {
    let mut args = pico_args::Arguments::from_env();

    let mut config = Configuration::default();
    for infobox in args.values_from_str::<_, String>("--infobox")? {
        config = config.with_infobox(infobox);
    }
    if let Some(argument) = opt_value(&mut args, "--argument", "DESSERT_ARGUMENT")? {
        config = config.with_ingredient_argument(argument);
    }
    let raw = args.contains("--raw");
    let json = args.contains("--json");
    let output = opt_value(&mut args, "--output", "DESSERT_OUTPUT")?;
    let _ = args.contains("--");

    let mut inputs = Vec::new();
    while let Some(input) = args.opt_free_from_str::<String>()? {
        inputs.push(input);
    }

    if !args.finish().is_empty() {
        return usage("Unknown extra arguments passed");
    } else if inputs.is_empty() {
        return usage("Missing page argument");
    }

    Ok(Options {
        config,
        raw,
        json,
        output,
        inputs,
    })
}

/// Reads an input, returning its title and contents.
fn read_input(path: &str) -> anyhow::Result<(String, String)> {
    if path == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read standard input")?;
        return Ok(("stdin".to_string(), source));
    }

    let source =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let title = Path::new(path)
        .file_stem()
        .map_or_else(|| path.to_string(), |stem| stem.to_string_lossy().into_owned());
    Ok((title, source))
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let options = parse_args()?;
    let extractor = Extractor::new(options.config);

    let pages = options
        .inputs
        .par_iter()
        .map(|path| -> anyhow::Result<Page> {
            let (title, source) = read_input(path)?;
            let ingredients = if options.raw {
                extractor.parse_argument(source.trim())
            } else {
                extractor.extract(&source)
            };
            log::debug!("{title}: {} ingredients", ingredients.len());
            Ok(Page { title, ingredients })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = pages.len();
    let pages = pages
        .into_iter()
        .filter(|page| !page.ingredients.is_empty())
        .collect::<Vec<_>>();
    #[allow(clippy::cast_precision_loss)]
    let percent = pages.len() as f64 * 100.0 / total as f64;
    log::info!(
        "Got ingredients for {} pages ({} / {total}, {percent:.1} %)",
        pages.len(),
        pages.len()
    );

    let mut out: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {path}"))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    if options.json {
        report::write_json(&mut out, &pages)?;
    } else {
        for page in &pages {
            report::write_text(&mut out, page)?;
        }
    }

    out.flush().context("Failed to write output")?;
    Ok(())
}
