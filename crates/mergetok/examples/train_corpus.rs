use clap::{Parser, ValueEnum};
use env_logger::Env;
use mergetok::decoders::TokenDecoder;
use mergetok::encoders::{BpeEncoder, TokenEncoder};
use mergetok::training::{BpeTrainerOptions, TrainResults};
use mergetok::types::AlphabetMode;
use mergetok::vocab::io::save_vocabulary_json;
use std::io::BufRead;
use std::sync::Arc;

/// Initial alphabet.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Mode {
    /// Unicode characters plus an end-of-word marker.
    Char,
    /// The 256 byte values.
    Byte,
}

impl From<Mode> for AlphabetMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Char => AlphabetMode::Character,
            Mode::Byte => AlphabetMode::Byte,
        }
    }
}

/// Example BPE trainer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a text corpus; one sample per line.
    #[arg(long)]
    pub corpus: String,

    /// Maximum number of merges.
    #[arg(long, default_value = "1000")]
    pub max_merges: usize,

    /// Initial alphabet.
    #[arg(long, value_enum, default_value = "byte")]
    pub mode: Mode,

    /// Number of learned merges to print.
    #[arg(long, default_value = "20")]
    pub show_merges: usize,

    /// Optional JSON vocabulary save path.
    #[arg(long)]
    pub save_path: Option<String>,

    /// Enable verbose output.
    #[arg(long, default_value = "false")]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level));
    builder.format_timestamp_millis();
    let _ = builder.try_init();

    if args.verbose {
        println!("{:#?}", args);
    }

    type T = u32;

    let file = std::fs::File::open(&args.corpus)?;
    let samples: Vec<String> = std::io::BufReader::new(file)
        .lines()
        .collect::<Result<_, _>>()?;

    println!("Training on {} samples from {:?}", samples.len(), args.corpus);
    let t0 = std::time::Instant::now();

    let TrainResults::<T> { vocab, word_count } =
        BpeTrainerOptions::new(args.mode.into(), args.max_merges)
            .train_from_samples(samples.iter())?;

    let training_duration = std::time::Instant::now().duration_since(t0);
    println!("- training_duration: {:#?}", training_duration);
    println!("- distinct words: {}", word_count);
    println!("- vocab size: {}", vocab.len());
    println!("- merges: {}", vocab.merge_rules().len());

    println!();
    println!("First merges:");
    for (rule, (left, right)) in vocab
        .merge_rules()
        .iter()
        .zip(vocab.merge_spans())
        .take(args.show_merges)
    {
        println!(
            "{:>6}: {:?} + {:?} -> {:?}",
            rule.rank,
            String::from_utf8_lossy(&left),
            String::from_utf8_lossy(&right),
            rule.token,
        );
    }

    if let Some(path) = &args.save_path {
        save_vocabulary_json(&vocab, path)?;
        println!("- vocab: {path:?}");
    }

    let encoder = BpeEncoder::new(Arc::new(vocab));
    let decoder = encoder.to_decoder();

    let token_batch = encoder.encode_batch(&samples);
    let total_bytes: usize = samples.iter().map(|s| s.len()).sum();
    let total_tokens: usize = token_batch.iter().map(|t| t.len()).sum();

    println!();
    println!("Observed Bytes/Token Stats:");
    println!("- total bytes: {}", total_bytes);
    println!("- total tokens: {}", total_tokens);
    if total_tokens > 0 {
        println!(
            "- sample byte/token: {:.2}",
            total_bytes as f64 / total_tokens as f64
        );
    }

    if let Some((sample, tokens)) = samples.iter().zip(&token_batch).next() {
        println!();
        println!("Sample: {sample:?}");
        println!("- tokens: {tokens:?}");
        println!("- decoded: {:?}", decoder.try_decode_to_string(tokens)?);
    }

    Ok(())
}
