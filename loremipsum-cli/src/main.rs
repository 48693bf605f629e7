use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, info};

use loremipsum_core::io::{model_path, read_text};
use loremipsum_core::model::generation_input::{ParagraphInput, SentenceInput};
use loremipsum_core::model::sample::{DEFAULT_SENTENCE_DELIMITERS, DEFAULT_WORD_DELIMITERS};
use loremipsum_core::model::variate::make_rng;
use loremipsum_core::{Generator, Sample};

#[derive(Parser)]
#[command(name = "loremipsum")]
#[command(author, version, about = "Generate placeholder text resembling a sample text")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a sample text and store the resulting model
    Cook(CookArgs),
    /// Print random words from the lexicon
    Words(WordsArgs),
    /// Print random sentences
    Sentences(SentencesArgs),
    /// Print random paragraphs
    Paragraphs(ParagraphsArgs),
}

#[derive(Args)]
struct CookArgs {
    /// Sample text: paragraphs separated by blank lines
    #[arg(long)]
    text: PathBuf,

    /// Whitespace separated words used in the output
    #[arg(long)]
    lexicon: PathBuf,

    #[arg(long, default_value = DEFAULT_WORD_DELIMITERS)]
    word_delimiters: String,

    #[arg(long, default_value = DEFAULT_SENTENCE_DELIMITERS)]
    sentence_delimiters: String,

    /// Where to store the model (`file://…`, `json://…` or a plain path).
    /// Defaults to the text path with a `.bin` extension
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Args)]
struct SourceArgs {
    /// Model locator; the bundled lorem-ipsum sample when omitted
    #[arg(short, long)]
    sample: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// How many units to print
    #[arg(short, long, default_value_t = 1)]
    amount: usize,
}

#[derive(Args)]
struct WordsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Word length in chars
    #[arg(short, long)]
    length: Option<usize>,
}

#[derive(Args)]
struct SentenceArgs {
    /// Exact sentence length in words
    #[arg(long)]
    sentence_len: Option<usize>,

    #[arg(long, allow_negative_numbers = true)]
    sentence_mean: Option<f64>,

    #[arg(long)]
    sentence_sigma: Option<f64>,

    /// Open with the first sentence of the sample text
    #[arg(long)]
    incipit: bool,
}

impl SentenceArgs {
    fn input(&self) -> SentenceInput {
        SentenceInput {
            sentence_len: self.sentence_len,
            sentence_mean: self.sentence_mean,
            sentence_sigma: self.sentence_sigma,
            incipit: self.incipit,
        }
    }
}

#[derive(Args)]
struct SentencesArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    sentence: SentenceArgs,
}

#[derive(Args)]
struct ParagraphsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Exact paragraph length in sentences
    #[arg(long)]
    paragraph_len: Option<usize>,

    #[arg(long, allow_negative_numbers = true)]
    paragraph_mean: Option<f64>,

    #[arg(long)]
    paragraph_sigma: Option<f64>,

    #[command(flatten)]
    sentence: SentenceArgs,
}

impl SourceArgs {
    fn generator(&self) -> loremipsum_core::Result<Generator> {
        match &self.sample {
            Some(locator) => {
                info!("Loading sample from {locator}");
                Ok(Generator::new(Sample::load(locator)?))
            }
            None => Generator::lorem_ipsum(),
        }
    }
}

fn cook(args: &CookArgs) -> Result<(), Box<dyn std::error::Error>> {
    let sample = Sample::builder()
        .text(read_text(&args.text)?)
        .lexicon(read_text(&args.lexicon)?)
        .word_delimiters(args.word_delimiters.as_str())
        .sentence_delimiters(args.sentence_delimiters.as_str())
        .build()?;

    let output = match &args.output {
        Some(output) => output.clone(),
        None => model_path(&args.text, "bin")?.display().to_string(),
    };
    sample.dump(&output)?;
    info!("Sample stored to {output}");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env().filter_level(level).init();

    match &cli.command {
        Command::Cook(args) => cook(args)?,
        Command::Words(args) => {
            let generator = args.source.generator()?;
            let mut rng = make_rng(args.source.seed);
            for word in generator.generate_words(args.source.amount, args.length, &mut rng) {
                // No word of the requested length: print an empty line
                println!("{}", word.unwrap_or_default());
            }
        }
        Command::Sentences(args) => {
            let generator = args.source.generator()?;
            let mut rng = make_rng(args.source.seed);
            for (_, text) in generator.generate_sentences(args.source.amount, args.sentence.input(), &mut rng) {
                println!("{text}");
            }
        }
        Command::Paragraphs(args) => {
            let generator = args.source.generator()?;
            let mut rng = make_rng(args.source.seed);
            let input = ParagraphInput {
                paragraph_len: args.paragraph_len,
                paragraph_mean: args.paragraph_mean,
                paragraph_sigma: args.paragraph_sigma,
                sentence: args.sentence.input(),
            };
            let paragraphs: Vec<String> = generator
                .generate_paragraphs(args.source.amount, input, &mut rng)
                .map(|(_, _, text)| text)
                .collect();
            println!("{}", paragraphs.join("\n\n"));
        }
    }

    Ok(())
}
