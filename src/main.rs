//! tagweave CLI
//!
//! Usage:
//!   tagweave [OPTIONS] [FILE]
//!
//! Renders a template from a file or stdin with `-b name=value` bindings,
//! or renders a key from a directory of translation bundles.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;

use tagweave::{
    render_markup_with, render_plain_with, Bindings, Locale, MissingPolicy, RenderConfig,
    RenderError, TranslationRegistry,
};

#[derive(Parser)]
#[command(name = "tagweave")]
#[command(about = "Tag-aware placeholder templating")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Placeholder binding as name=value (repeatable)
    #[arg(short, long = "bind", value_name = "NAME=VALUE")]
    bind: Vec<String>,

    /// Emit the plain-text projection instead of markup
    #[arg(short, long)]
    plain: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Missing-placeholder policy: error, keep-literal, or empty
    #[arg(long, value_name = "POLICY")]
    on_missing: Option<String>,

    /// Directory of <locale>.properties translation bundles
    #[arg(short, long)]
    translations: Option<PathBuf>,

    /// Translation key to render (requires --translations)
    #[arg(short, long)]
    key: Option<String>,

    /// Locale for translation lookup
    #[arg(short, long, default_value = "en")]
    locale: String,

    /// Positional argument for the translation format (repeatable)
    #[arg(short, long = "arg", value_name = "VALUE")]
    args: Vec<String>,

    /// Show template grammar reference
    #[arg(short, long)]
    grammar: bool,

    /// Show annotated examples
    #[arg(short, long)]
    examples: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    if cli.examples {
        print_examples();
        return;
    }

    // Assemble the pipeline configuration
    let mut config = match &cli.config {
        Some(path) => match RenderConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                exit(1);
            }
        },
        None => RenderConfig::default(),
    };
    if let Some(policy) = &cli.on_missing {
        match policy.parse::<MissingPolicy>() {
            Ok(policy) => config = config.with_on_missing(policy),
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        }
    }

    if let Some(key) = &cli.key {
        render_translation(&cli, key, config);
        return;
    }

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    exit(1);
                }
            }
        }
    };

    let bindings = match parse_bindings(&cli.bind) {
        Ok(bindings) => bindings,
        Err(bad) => {
            eprintln!("Error: binding '{}' is not in name=value form", bad);
            exit(1);
        }
    };

    let result = if cli.plain {
        render_plain_with(&source, &bindings, &config)
    } else {
        render_markup_with(&source, &bindings, &config)
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(RenderError::Parse(e)) => {
            eprintln!("{}", e.format(&source, &filename));
            exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn render_translation(cli: &Cli, key: &str, config: RenderConfig) {
    let Some(dir) = &cli.translations else {
        eprintln!("Error: --key requires --translations");
        exit(1);
    };

    let locale: Locale = match cli.locale.parse() {
        Ok(locale) => locale,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let mut registry = TranslationRegistry::with_config(locale.clone(), config);
    match registry.load_dir(dir) {
        Ok(summary) => {
            for path in &summary.skipped {
                eprintln!(
                    "Warning: skipping '{}': file stem is not a locale",
                    path.display()
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading translations from '{}': {}", dir.display(), e);
            exit(1);
        }
    }

    let args: Vec<&str> = cli.args.iter().map(String::as_str).collect();
    let result = if cli.plain {
        registry.render_plain(key, &locale, &args)
    } else {
        registry.render_markup(key, &locale, &args)
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn parse_bindings(pairs: &[String]) -> Result<Bindings, String> {
    let mut bindings = Bindings::new();
    for pair in pairs {
        match pair.split_once('=') {
            Some((name, value)) => bindings = bindings.text(name, value),
            None => return Err(pair.clone()),
        }
    }
    Ok(bindings)
}

fn print_intro() {
    println!(
        r#"tagweave - tag-aware placeholder templating

USAGE:
    tagweave [OPTIONS] [FILE]
    echo '<template>' | tagweave

OPTIONS:
    -b, --bind NAME=VALUE   Placeholder binding (repeatable)
    -p, --plain             Plain-text projection instead of markup
    -c, --config FILE       Pipeline configuration (TOML)
    --on-missing POLICY     error | keep-literal | empty
    -t, --translations DIR  Directory of <locale>.properties bundles
    -k, --key KEY           Render a translation key
    -l, --locale LOCALE     Locale for translation lookup
    -a, --arg VALUE         Positional format argument (repeatable)
    -g, --grammar           Show template grammar reference
    -e, --examples          Show annotated examples
    -h, --help              Print help

QUICK START:
    echo 'Hello <b>%name%</b>!' | tagweave -b name=World

This substitutes the placeholder and re-emits the markup.
Run --grammar for syntax reference or --examples for more patterns."#
    );
}

fn print_grammar() {
    println!(
        r#"TAGWEAVE TEMPLATE GRAMMAR
=========================

TAGS
----
<name>...</name>          Styled span; tags nest strictly
<name:arg:arg>...</name>  Tag with arguments, e.g. <color:red>

Tag names use letters, digits, '_', '.', '-'. Every open tag needs a
matching close before the end of input; closes must match the innermost
open tag.

PLACEHOLDERS
------------
%name%          Substituted from a binding; names use the tag charset.
                Binding values are always literal text, never markup.

Missing-binding policy (--on-missing):
    error           Fail the render (default)
    keep-literal    Re-emit the placeholder token unchanged
    empty           Substitute nothing

ESCAPES
-------
\<  \>  \%  \\   Literal delimiter characters

TRANSLATIONS
------------
Bundles are <locale>.properties files (en.properties, de_DE.properties).
Values are templates with positional sites:

    greeting=Hello {{0}} and {{1}}

{{0}} refers to --arg values in order; {{}} auto-increments. A value may
reference another key: <lang:other_key:arg></lang>.

Lookup falls back: exact locale -> language -> default locale ->
default language.

CONFIGURATION (TOML)
--------------------
on_missing = "keep_literal"

[syntax]
tag_open = "<"      tag_close = ">"
close_marker = "/"  arg_separator = ":"
placeholder = "%"   escape = "\\""#
    );
}

fn print_examples() {
    println!(
        r#"TAGWEAVE EXAMPLES
=================

EXAMPLE 1: Placeholder inside styled text
-----------------------------------------
    echo 'Hello <b>%name%</b>!' | tagweave -b name=World

Markup output keeps the bold wrapper around the substituted value:
    Hello <b>World</b>!

EXAMPLE 2: Plain-text projection
--------------------------------
    echo '<color:red>Error:</color> %reason%' | tagweave -p -b reason=timeout

Strips every tag:
    Error: timeout

EXAMPLE 3: Values are never markup
----------------------------------
    echo '%v%' | tagweave -b 'v=<i>x</i>'

The binding value is escaped, not parsed:
    \<i>x\</i>

EXAMPLE 4: Keeping unresolved placeholders
------------------------------------------
    echo 'Hi %name%' | tagweave --on-missing keep-literal

    Hi %name%

EXAMPLE 5: Translations
-----------------------
    # translations/en.properties:  greeting=Hello <b>{{0}}</b>
    # translations/de.properties:  greeting=Hallo <b>{{0}}</b>
    tagweave -t translations -k greeting -l de -a World

    Hallo <b>World</b>"#
    );
}
