//! pdfsift CLI - PDF text extraction with OCR fallback and summarization

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsift::ocr::{installation_message, PdftoppmRenderer, TesseractCli};
use pdfsift::tools::{to_json, ToolCall, ToolError};
use pdfsift::{
    ExtractRequest, JsonFormat, OcrConfig, PdfExtractor, SummarizeRequest, ToolResponse, Toolbox,
};

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF text with OCR fallback and summarize it", long_about = None)]
struct Cli {
    /// Tesseract executable
    #[arg(long, global = true, env = "TESSERACT_CMD", value_name = "PATH")]
    tesseract_cmd: Option<PathBuf>,

    /// pdftoppm executable used to render pages for OCR
    #[arg(long, global = true, env = "PDFTOPPM_CMD", value_name = "PATH")]
    pdftoppm_cmd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a PDF, running OCR on pages with little embedded text
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// 0-indexed pages to extract (e.g., "0,2,5")
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        pages: Vec<i64>,

        /// Never run OCR
        #[arg(long)]
        no_ocr: bool,

        /// OCR language code
        #[arg(long, default_value = "eng")]
        lang: String,

        /// Attach a summary of the extracted text
        #[arg(short, long)]
        summarize: bool,

        /// Guidance for focus detection (e.g., "focus on prescriptions")
        #[arg(long)]
        context: Option<String>,

        /// Sentence cap for the summary
        #[arg(long)]
        max_sentences: Option<usize>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Summarize raw text from a file or stdin
    Summarize {
        /// Input text file ("-" or omitted for stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Guidance for focus detection
        #[arg(long)]
        context: Option<String>,

        /// Sentence cap for the summary
        #[arg(long)]
        max_sentences: Option<usize>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Answer JSON-lines tool calls on stdin
    Serve,

    /// Check OCR tool availability
    Doctor,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = ocr_config(&cli);

    let result = match cli.command {
        Commands::Extract {
            input,
            pages,
            no_ocr,
            lang,
            summarize,
            context,
            max_sentences,
            compact,
            output,
        } => {
            let request = ExtractRequest {
                file_path: input.to_string_lossy().into_owned(),
                pages: if pages.is_empty() { None } else { Some(pages) },
                summarize,
                context,
                max_sentences,
                enable_ocr: !no_ocr,
                language: lang,
            };
            cmd_extract(&config, &request, json_format(compact), output.as_deref())
        }
        Commands::Summarize {
            input,
            context,
            max_sentences,
            compact,
        } => cmd_summarize(input.as_deref(), context, max_sentences, json_format(compact)),
        Commands::Serve => cmd_serve(&config),
        Commands::Doctor => {
            cmd_doctor(&config);
            Ok(())
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn ocr_config(cli: &Cli) -> OcrConfig {
    let mut config = OcrConfig::from_env();
    if let Some(cmd) = &cli.tesseract_cmd {
        config = config.with_tesseract_cmd(cmd);
    }
    if let Some(cmd) = &cli.pdftoppm_cmd {
        config = config.with_pdftoppm_cmd(cmd);
    }
    config
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_extract(
    config: &OcrConfig,
    request: &ExtractRequest,
    format: JsonFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Checking OCR tools...");
    let toolbox = Toolbox::with_extractor(PdfExtractor::with_config(config));

    pb.set_message(format!("Extracting {}...", request.file_path));
    let response = toolbox.extract_text_from_pdf(request);
    pb.finish_and_clear();

    let json = to_json(&response, format)?;
    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    if let ToolResponse::Error(e) = &response {
        return Err(e.error.clone().into());
    }
    Ok(())
}

fn cmd_summarize(
    input: Option<&Path>,
    context: Option<String>,
    max_sentences: Option<usize>,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let request = SummarizeRequest {
        pdf_text: text,
        context,
        max_sentences,
    };

    let toolbox = Toolbox::with_extractor(PdfExtractor::with_engine(pdfsift::OcrEngine::unavailable()));
    let response = toolbox.summarize_pdf_section(&request);
    println!("{}", to_json(&response, format)?);

    if let ToolResponse::Error(e) = &response {
        return Err(e.error.clone().into());
    }
    Ok(())
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn cmd_serve(config: &OcrConfig) -> Result<(), Box<dyn std::error::Error>> {
    let toolbox = Toolbox::with_extractor(PdfExtractor::with_config(config));
    log::info!("Serving tool calls on stdin");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(&toolbox, &line);
        writeln!(stdout, "{}", to_json(&response, JsonFormat::Compact)?)?;
        stdout.flush()?;
    }

    Ok(())
}

fn handle_line(toolbox: &Toolbox, line: &str) -> ToolResponse {
    match serde_json::from_str::<ToolCall>(line) {
        Ok(call) => toolbox.dispatch(&call),
        Err(e) => ToolResponse::Error(ToolError::validation(format!("Invalid request: {}", e))),
    }
}

fn cmd_doctor(config: &OcrConfig) {
    println!("{}", "OCR Tools".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let tesseract = TesseractCli::probe(config);
    match &tesseract {
        Some(cli) => println!(
            "{}: {} ({})",
            "Tesseract".bold(),
            cli.version().green(),
            cli.command().display()
        ),
        None => println!("{}: {}", "Tesseract".bold(), "not found".red()),
    }

    let renderer = PdftoppmRenderer::from_config(config);
    if renderer.is_available() {
        println!(
            "{}: {} ({})",
            "pdftoppm".bold(),
            "available".green(),
            renderer.command().display()
        );
    } else {
        println!("{}: {}", "pdftoppm".bold(), "not found".red());
    }

    if tesseract.is_none() {
        println!();
        println!("{}", installation_message().yellow());
    }
}

fn cmd_version() {
    println!("{} {}", "pdfsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF text extraction with OCR fallback and summarization");
    println!();
    println!("License: MIT");
}
