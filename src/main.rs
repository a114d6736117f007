use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use seqscan::alphabet::Alphabet;
use seqscan::complement::{complement, reverse_complement, ComplementTable};
use seqscan::composition::{self, Band};
use seqscan::config::Config;
use seqscan::gene::classify_batch;
use seqscan::io::fasta::read_first_sequence;
use seqscan::io::output_json::to_json_string;
use seqscan::io::output_text::write_classifications;
use seqscan::io::records::read_records_file;
use seqscan::kmer::{count_kmers, enumerate_kmers};
use seqscan::motif::{fragment_lengths, locate, locate_all, Fragments};
use seqscan::report::RunReport;
use seqscan::sequence::{purge, Sequence};
use seqscan::splice::{extract, partition, Span};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

/// seqscan: sequence composition and motif engine.
///
/// Scores composition, complements, locates motifs, splices exons and
/// enumerates k-mers over nucleotide or protein sequences, and tags gene
/// records by species, length and composition/expression filters.
#[derive(Parser, Debug)]
#[command(author = "seqscan developers", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where a single-sequence command takes its sequence from.
#[derive(Args, Debug, Clone)]
struct SequenceInput {
    /// Sequence given directly on the command line.
    #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
    sequence: Option<String>,

    /// FASTA or plain-text file; only the first record is analysed.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Alphabet to validate against (nucleotide, protein).
    #[arg(short, long, default_value = "nucleotide")]
    alphabet: Alphabet,

    /// Symbols to strip from the input before validation (e.g. XKSL).
    #[arg(long)]
    purge: Option<String>,

    /// Print the result as JSON instead of plain text.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Composition ratio of a symbol set, with its low/medium/high band
    Composition {
        #[command(flatten)]
        input: SequenceInput,

        /// Target symbols whose combined frequency is measured.
        #[arg(long, default_value = "AT")]
        symbols: String,

        /// Report the composition as a percentage.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        percent: bool,
    },

    /// Complement (or reverse complement) a nucleotide sequence
    Complement {
        #[command(flatten)]
        input: SequenceInput,

        /// Reverse the sequence as well.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        reverse: bool,
    },

    /// Locate a motif and size the fragments either side of it
    Motif {
        #[command(flatten)]
        input: SequenceInput,

        /// Literal motif to search for (e.g. GAATTC).
        #[arg(short, long)]
        motif: String,

        /// Also list every occurrence, overlapping ones included.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        all: bool,
    },

    /// Extract and join exon ranges
    Splice {
        #[command(flatten)]
        input: SequenceInput,

        /// Exon range as start:end (either side may be empty). Repeatable.
        #[arg(long = "span", required = true)]
        spans: Vec<Span>,

        /// Split around a single span into leading / exon / trailing parts.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        partition: bool,
    },

    /// Enumerate overlapping k-mers
    Kmers {
        #[command(flatten)]
        input: SequenceInput,

        /// Window size.
        #[arg(short = 'k', long)]
        size: usize,

        /// Print a frequency table of k-mers seen at least this many times.
        #[arg(long)]
        min_count: Option<usize>,
    },

    /// Tag gene records (species,sequence,name,expression rows)
    Classify {
        /// Comma-delimited records file.
        #[arg(short, long)]
        records: PathBuf,

        /// JSON configuration file with classifier thresholds.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of threads (default: number of logical CPU cores).
        #[arg(long)]
        threads: Option<usize>,

        /// Save the full run report as JSON.
        #[arg(short = 'j', long)]
        output_json: Option<PathBuf>,

        /// Write the tab-separated table here instead of stdout.
        #[arg(long)]
        output_text: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct CompositionOutput {
    id: String,
    length: usize,
    symbols: String,
    ratio: f64,
    percentage: f64,
    band: Band,
    excluded: usize,
    excluded_over_quarter: bool,
    counts: BTreeMap<char, usize>,
}

#[derive(Serialize)]
struct MotifOutput {
    id: String,
    motif: String,
    index: Option<usize>,
    fragments: Option<Fragments>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occurrences: Option<Vec<usize>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Composition { input, symbols, percent } => run_composition(&input, &symbols, percent)?,
        Commands::Complement { input, reverse } => run_complement(&input, reverse)?,
        Commands::Motif { input, motif, all } => run_motif(&input, &motif, all)?,
        Commands::Splice { input, spans, partition } => run_splice(&input, &spans, partition)?,
        Commands::Kmers { input, size, min_count } => run_kmers(&input, size, min_count)?,
        Commands::Classify { records, config, threads, output_json, output_text } => {
            run_classify(records, config, threads, output_json, output_text)?
        }
    }

    debug!("Finished in {:?}", start.elapsed());
    Ok(())
}

/// Reads, purges, and validates the sequence named by `input`.
fn load_sequence(input: &SequenceInput) -> Result<(String, Sequence)> {
    let (id, raw) = match (&input.sequence, &input.input) {
        (Some(literal), _) => ("sequence".to_string(), literal.clone()),
        (None, Some(path)) => read_first_sequence(path)?,
        (None, None) => bail!("Either --sequence or --input must be given."),
    };

    let raw = match &input.purge {
        Some(symbols) => purge(&raw, symbols),
        None => raw,
    };

    let sequence = Sequence::new(&raw, input.alphabet)
        .with_context(|| format!("Sequence '{}' is not a valid {} sequence", id, input.alphabet))?;
    info!("Loaded '{}' ({} symbols)", id, sequence.len());
    Ok((id, sequence))
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", to_json_string(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn run_composition(input: &SequenceInput, symbols: &str, percent: bool) -> Result<()> {
    let (id, sequence) = load_sequence(input)?;
    let result = composition::analyze(&sequence, symbols)
        .with_context(|| format!("Cannot compute composition of '{}'", id))?;

    let output = CompositionOutput {
        id,
        length: sequence.len(),
        symbols: symbols.to_ascii_uppercase(),
        ratio: result.ratio,
        percentage: result.ratio * 100.0,
        band: result.band,
        excluded: composition::excluded_count(&sequence, symbols),
        excluded_over_quarter: composition::exceeds_quarter(&sequence, symbols),
        counts: composition::symbol_counts(&sequence),
    };

    emit(input.json, &output, || {
        if percent {
            format!("{}\t{}\t{:.2}%\t{}", output.id, output.symbols, output.percentage, output.band)
        } else {
            format!("{}\t{}\t{:.4}\t{}", output.id, output.symbols, output.ratio, output.band)
        }
    })
}

fn run_complement(input: &SequenceInput, reverse: bool) -> Result<()> {
    if input.alphabet != Alphabet::Nucleotide {
        bail!("Complementation is only defined for nucleotide sequences.");
    }
    let (id, sequence) = load_sequence(input)?;
    let table = ComplementTable::dna();
    let result = if reverse {
        reverse_complement(&sequence, &table)?
    } else {
        complement(&sequence, &table)?
    };

    emit(input.json, &serde_json::json!({ "id": id, "complement": result }), || result.clone())
}

fn run_motif(input: &SequenceInput, motif: &str, all: bool) -> Result<()> {
    let (id, sequence) = load_sequence(input)?;
    let motif = motif.trim().to_ascii_uppercase();

    let output = MotifOutput {
        index: locate(&sequence, &motif),
        fragments: fragment_lengths(&sequence, &motif),
        occurrences: all.then(|| locate_all(&sequence, &motif)),
        id,
        motif,
    };

    emit(input.json, &output, || {
        let mut lines = Vec::new();
        match output.index {
            Some(index) => {
                lines.push(format!("{}\t{}\t{}", output.id, output.motif, index));
                if let Some(f) = output.fragments {
                    lines.push(format!("fragments\t{}\t{}", f.upstream, f.downstream));
                }
            }
            None => lines.push(format!("{}\t{}\tnot found", output.id, output.motif)),
        }
        if let Some(occurrences) = &output.occurrences {
            let positions: Vec<String> = occurrences.iter().map(|p| p.to_string()).collect();
            lines.push(format!("occurrences\t{}", positions.join(",")));
        }
        lines.join("\n")
    })
}

fn run_splice(input: &SequenceInput, spans: &[Span], split: bool) -> Result<()> {
    let (id, sequence) = load_sequence(input)?;

    if split {
        let [exon] = spans else {
            bail!("--partition takes exactly one --span, got {}", spans.len());
        };
        let segments = partition(&sequence, *exon)
            .with_context(|| format!("Cannot partition '{}' at {}", id, exon))?;
        return emit(input.json, &segments, || {
            format!("leading\t{}\nexon\t{}\ntrailing\t{}", segments.leading, segments.exon, segments.trailing)
        });
    }

    let spliced = extract(&sequence, spans.iter().copied())
        .with_context(|| format!("Cannot splice '{}'", id))?;
    emit(input.json, &serde_json::json!({ "id": id, "spliced": spliced }), || spliced.clone())
}

fn run_kmers(input: &SequenceInput, size: usize, min_count: Option<usize>) -> Result<()> {
    let (id, sequence) = load_sequence(input)?;

    if let Some(min_count) = min_count {
        let counts = count_kmers(sequence.as_str(), size, min_count)
            .with_context(|| format!("Cannot count {}-mers of '{}'", size, id))?;
        if counts.is_empty() && !input.json {
            return Ok(());
        }
        return emit(input.json, &counts, || {
            counts
                .iter()
                .map(|(kmer, count)| format!("{}\t{}", kmer, count))
                .collect::<Vec<_>>()
                .join("\n")
        });
    }

    let kmers: Vec<&str> = enumerate_kmers(sequence.as_str(), size)
        .with_context(|| format!("Cannot enumerate {}-mers of '{}'", size, id))?
        .collect();
    if kmers.is_empty() && !input.json {
        return Ok(());
    }
    emit(input.json, &kmers, || kmers.join("\n"))
}

fn run_classify(
    records_path: PathBuf,
    config_path: Option<PathBuf>,
    threads: Option<usize>,
    output_json: Option<PathBuf>,
    output_text: Option<PathBuf>,
) -> Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    if threads.is_some() {
        config.threads = threads;
    }
    config.validate()?;

    let parsed = read_records_file(&records_path)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads())
        .build()
        .context("Failed to build thread pool")?;
    info!("Classifying {} records with {} threads", parsed.records.len(), config.num_threads());
    let results = pool.install(|| classify_batch(&parsed.records, &config.classifier));

    match &output_text {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create text output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_classifications(&mut writer, &results)?;
            writer.flush().context("Failed to flush text output")?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_classifications(&mut writer, &results)?;
        }
    }

    if let Some(path) = &output_json {
        let report = RunReport::new(records_path, config.classifier, parsed.rejected, results);
        report.save(path)?;
    }

    Ok(())
}
