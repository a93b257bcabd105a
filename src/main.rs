use clap::Parser;
use html::{Document, collect, debug, parse_document, parse_fragment};
use mimalloc::MiMalloc;
use render_plan::{CompileOptions, Compiler, OverrideRegistry};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use style::StyleConfiguration;
use url::Url;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DOM_OUTLINE_CAP: usize = 10_000;

/// Compile markup into a render plan and print its outline.
#[derive(Parser)]
#[command(name = "htmlplan")]
#[command(version)]
struct Args {
    /// Parse the input as a whole document instead of a body fragment
    #[arg(long, conflicts_with = "fragment")]
    document: bool,

    /// Parse the input as a body fragment (default)
    #[arg(long)]
    fragment: bool,

    /// Style configuration file (TOML) layered over the standard style
    #[arg(long, value_name = "FILE.toml")]
    style: Option<PathBuf>,

    /// Base URL for relative link targets
    #[arg(long)]
    base_url: Option<Url>,

    /// Print the parsed DOM outline before the plan
    #[arg(long)]
    dom: bool,

    /// Print every link target found in the input
    #[arg(long)]
    links: bool,

    /// Input file; stdin when absent or `-`
    file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let markup = read_input(args.file.as_ref())?;
    let doc = if args.document {
        parse_document(&markup)
    } else {
        parse_fragment(&markup)
    };
    let style = load_style(args.style.as_ref());
    let registry = OverrideRegistry::new();
    let compiler = Compiler::new(&style, &registry).with_options(CompileOptions {
        base_url: args.base_url,
        ..CompileOptions::default()
    });

    let mut out = io::stdout().lock();
    if args.dom {
        writeln!(out, "# dom")?;
        for line in debug::outline(&doc, DOM_OUTLINE_CAP) {
            writeln!(out, "{line}")?;
        }
    }
    if args.links {
        writeln!(out, "# links")?;
        for href in collect::link_hrefs(&doc.children) {
            writeln!(out, "{href}")?;
        }
    }
    if args.dom || args.links {
        writeln!(out, "# plan")?;
    }
    print_plan(&mut out, &compiler, &doc)?;
    out.flush()
}

fn read_input(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut markup = String::new();
            io::stdin().read_to_string(&mut markup)?;
            Ok(markup)
        }
    }
}

/// Standard style, with the file's entries layered on top when it loads.
fn load_style(path: Option<&PathBuf>) -> StyleConfiguration {
    let standard = StyleConfiguration::standard();
    let Some(path) = path else {
        return standard;
    };
    match StyleConfiguration::from_path(path) {
        Ok(custom) => standard.overlay(&custom),
        Err(err) => {
            log::warn!("ignoring style file: {err}");
            standard
        }
    }
}

fn print_plan(out: &mut impl Write, compiler: &Compiler<'_>, doc: &Document) -> io::Result<()> {
    let plan = compiler.compile(&doc.children);
    log::debug!("{} top-level plan nodes", plan.len());
    for line in plan_test_support::format_plan(&plan) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
