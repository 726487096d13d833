use anyhow::{anyhow, Context};
use clap::Parser;
use hoist::diagnostic::DefaultReporter;
use hoist::pipeline::{SourceBackend, StandardFrontend, TreeBackend};
use hoist::{source, Backend, HeaderStyle, HoistConfig, ScopeMode, Source, Transformer};
use std::path::PathBuf;

const SAMPLES: [(&str, &str); 3] = [
    (
        "<loop sample>",
        "function add(a, b) {\n  var c = 3;\n  return a + b;\n}\n\nvar sub = function(a, b) {\n  var c = 3;\n  return a - b;\n}\nwhile (shift <= 200) {\n  // console.log(shift);\n  var x = add(1, shift);\n  shift += 14; // increment\n}",
    ),
    (
        "<conditional sample>",
        "var foo = 1;\nvar bar = foo + 2 < 3;\nif(foo + 2 < 3) {\n  console.log('it is');\n}\nconsole.log(foo);",
    ),
    ("<single declaration sample>", "var foo = 1;"),
];

/// Move every `var` declaration to the top of its enclosing scope.
#[derive(Parser)]
#[command(name = "hoist", version)]
struct Args {
    /// Files to hoist; the built-in samples are used when none are given
    files: Vec<PathBuf>,

    /// Hoist to the enclosing `function` or to the nearest `block`
    #[arg(long, value_enum, default_value_t = ScopeMode::Function)]
    scope: ScopeMode,

    /// Declare all hoisted names in one `var` statement per scope
    #[arg(long)]
    combine: bool,

    /// Print the hoisted tree instead of source text
    #[arg(long)]
    tree: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let header = if args.combine {
        HeaderStyle::Combined
    } else {
        HeaderStyle::PerName
    };
    let config = HoistConfig::new().with_scope(args.scope).with_header(header);

    let backend: Box<dyn Backend> = if args.tree {
        Box::new(TreeBackend)
    } else {
        Box::new(SourceBackend)
    };
    let transformer = Transformer::new(
        Box::new(StandardFrontend),
        backend,
        DefaultReporter::new(),
        config,
    );

    for source in sources(&args.files)? {
        let name = source.name.clone();
        let hoisted = transformer
            .hoist_source(source)
            .map_err(|e| anyhow!("{}", e))?;
        if args.files.len() != 1 {
            println!("// {}", name);
        }
        println!("{}\n", hoisted);
    }

    Ok(())
}

fn sources(files: &[PathBuf]) -> anyhow::Result<Vec<Source>> {
    if files.is_empty() {
        return Ok(SAMPLES
            .iter()
            .map(|(name, text)| source::named(text, name))
            .collect());
    }

    files
        .iter()
        .map(|path| {
            let path = path.to_string_lossy();
            source::file(&path).with_context(|| format!("could not read {}", path))
        })
        .collect()
}
