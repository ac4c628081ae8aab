//! schemakit CLI
//!
//! Builds a leaf schema from command-line flags, then prints its canonical
//! description or validates an inline JSON value against it.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use schemakit::{
    BooleanSchema, EnumSchema, Fingerprint, NullSchema, NumberSchema, Schema, SchemakitConfig,
    StringSchema, Validator,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemakit")]
#[command(about = "Describe schemas and validate JSON values against them")]
struct Cli {
    /// Path to a config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical description of a schema
    Describe {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Also print the schema fingerprint
        #[arg(long)]
        fingerprint: bool,
    },

    /// Validate a JSON value against a schema
    Validate {
        #[command(flatten)]
        schema: SchemaArgs,

        /// The value to validate, as JSON
        #[arg(short, long)]
        subject: String,

        /// Report only the first violation
        #[arg(long)]
        fail_early: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Boolean,
    String,
    Number,
    Integer,
    Null,
    Enum,
}

#[derive(Args)]
struct SchemaArgs {
    /// Schema kind
    #[arg(value_enum)]
    kind: KindArg,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Schema identifier ($id)
    #[arg(long)]
    id: Option<String>,

    /// Default value, as JSON
    #[arg(long)]
    default: Option<String>,

    #[arg(long)]
    min_length: Option<usize>,

    #[arg(long)]
    max_length: Option<usize>,

    #[arg(long)]
    minimum: Option<f64>,

    #[arg(long)]
    maximum: Option<f64>,

    /// Permitted enum value, as JSON (repeatable)
    #[arg(long = "value")]
    values: Vec<String>,
}

macro_rules! with_metadata {
    ($builder:expr, $args:expr) => {{
        let mut builder = $builder;
        if let Some(title) = &$args.title {
            builder = builder.title(title);
        }
        if let Some(description) = &$args.description {
            builder = builder.description(description);
        }
        if let Some(id) = &$args.id {
            builder = builder.id(id);
        }
        builder
    }};
}

fn parse_json(label: &str, text: &str) -> anyhow::Result<Value> {
    serde_json::from_str(text).with_context(|| format!("{} is not valid JSON: {}", label, text))
}

impl SchemaArgs {
    fn default_json(&self) -> anyhow::Result<Option<Value>> {
        self.default
            .as_deref()
            .map(|text| parse_json("--default", text))
            .transpose()
    }

    fn build(&self) -> anyhow::Result<Schema> {
        let default = self.default_json()?;
        let schema: Schema = match self.kind {
            KindArg::Boolean => {
                let mut builder = with_metadata!(BooleanSchema::builder(), self);
                match default {
                    Some(Value::Bool(b)) => builder = builder.default_value(b),
                    Some(other) => bail!("boolean default must be true or false, got {}", other),
                    None => {}
                }
                builder.build().into()
            }
            KindArg::String => {
                let mut builder = with_metadata!(StringSchema::builder(), self);
                if let Some(min) = self.min_length {
                    builder = builder.min_length(min);
                }
                if let Some(max) = self.max_length {
                    builder = builder.max_length(max);
                }
                match default {
                    Some(Value::String(s)) => builder = builder.default_value(s),
                    Some(other) => bail!("string default must be a JSON string, got {}", other),
                    None => {}
                }
                builder.build().into()
            }
            KindArg::Number | KindArg::Integer => {
                let mut builder = with_metadata!(NumberSchema::builder(), self)
                    .requires_integer(matches!(self.kind, KindArg::Integer));
                if let Some(min) = self.minimum {
                    builder = builder.minimum(min);
                }
                if let Some(max) = self.maximum {
                    builder = builder.maximum(max);
                }
                match default.as_ref().map(|d| (d, d.as_f64())) {
                    Some((_, Some(n))) => builder = builder.default_value(n),
                    Some((other, None)) => bail!("number default must be numeric, got {}", other),
                    None => {}
                }
                builder.build().into()
            }
            KindArg::Null => with_metadata!(NullSchema::builder(), self).build().into(),
            KindArg::Enum => {
                let mut builder = with_metadata!(EnumSchema::builder(), self);
                for text in &self.values {
                    builder = builder.value(parse_json("--value", text)?);
                }
                if let Some(default) = default {
                    builder = builder.default_value(default);
                }
                builder.build().into()
            }
        };
        Ok(schema)
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match SchemakitConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load config: {}", e);
            std::process::exit(2);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli, &config) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli, config: &SchemakitConfig) -> anyhow::Result<bool> {
    let format = config.output.format;

    match cli.command {
        Commands::Describe {
            schema,
            fingerprint,
        } => {
            let schema = schema.build()?;
            println!("{}", format.render(&schema.to_document())?);
            if fingerprint {
                println!("fingerprint: {}", Fingerprint::of(&schema));
            }
            Ok(true)
        }

        Commands::Validate {
            schema,
            subject,
            fail_early,
        } => {
            let schema = schema.build()?;
            let subject = parse_json("--subject", &subject)?;
            let mut validator = Validator::from_config(&config.validation);
            if fail_early {
                validator = validator.fail_early(true);
            }

            match validator.validate(&schema, &subject) {
                Ok(()) => {
                    println!("✅ valid");
                    Ok(true)
                }
                Err(failure) => {
                    println!("❌ {} violation(s)", failure.violation_count());
                    println!("{}", format.render(&failure.to_json())?);
                    Ok(false)
                }
            }
        }
    }
}
