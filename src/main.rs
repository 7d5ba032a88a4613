//! Sawyer CLI

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use memmap2::Mmap;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sawyer::checksum::{
    rotate_checksum, track_checksum_variant, validate_checksum, CHECKSUM_SIZE,
};
use sawyer::container::ChunkReader;
use sawyer::{checksum, detect_file_type, ChunkHeader, Classification, Config};

/// Bytes of each decoded chunk shown by `chunks`
const PREVIEW_LEN: usize = 16;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Sawyer v{}", env!("CARGO_PKG_VERSION"));
        eprintln!();
        eprintln!("Usage: sawyer <command> <file> [config.toml]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  detect    Identify the RCT1 edition of an SV4/SC4 file");
        eprintln!("  checksum  Show the checksums of a file");
        eprintln!("  track     Validate a track design checksum");
        eprintln!("  chunks    List and decode the chunks of a container");
        process::exit(1);
    }

    let command = &args[1];
    let path = PathBuf::from(&args[2]);
    let config_path = args.get(3).map(PathBuf::from);

    let result = match command.as_str() {
        "detect" => detect(&path),
        "checksum" => show_checksums(&path),
        "track" => track(&path),
        "chunks" => list_chunks(&path, config_path.as_deref()).map(|_| ()),
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!("Run 'sawyer' for usage information.");
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn open(path: &Path) -> Result<Mmap> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mmap = unsafe { Mmap::map(&file)? };
    info!("Mapped {} ({} bytes)", path.display(), mmap.len());
    Ok(mmap)
}

fn detect(path: &Path) -> Result<()> {
    let data = open(path)?;

    match detect_file_type(&data) {
        Classification::Recognized(file_type) => {
            println!("Kind:    {:?}", file_type.kind);
            println!("Version: {:?}", file_type.version);
            println!("Bits:    {:#06b}", file_type.to_bits());
        }
        Classification::Unrecognized => {
            warn!("No known checksum residual for {}", path.display());
            println!("Unrecognized file");
        }
    }

    Ok(())
}

fn show_checksums(path: &Path) -> Result<()> {
    let data = open(path)?;

    println!("Additive checksum: {:#010x}", checksum(&data));
    println!("Rotate checksum:   {:#010x}", rotate_checksum(&data));
    println!("Trailing checksum valid: {}", validate_checksum(&data));

    Ok(())
}

fn track(path: &Path) -> Result<()> {
    let data = open(path)?;

    match track_checksum_variant(&data) {
        Some(variant) => println!("Valid track design ({variant:?})"),
        None => {
            warn!("Track checksum failed for {}", path.display());
            println!("Invalid track design checksum");
        }
    }

    Ok(())
}

/// A decoded chunk and where its header starts
struct DecodedChunk {
    offset: usize,
    header: ChunkHeader,
    data: Vec<u8>,
}

fn decode_chunks(data: &[u8], capacity: usize) -> Result<Vec<DecodedChunk>> {
    let mut reader = ChunkReader::new(data);
    let mut chunks = Vec::new();

    // a finished container ends with its 4 byte checksum
    while reader.remaining().len() > CHECKSUM_SIZE {
        let header = reader.peek_header()?;
        let offset = reader.position();
        let decoded = reader.read_chunk(capacity).with_context(|| {
            format!("Failed to decode chunk {} at offset {offset}", chunks.len())
        })?;

        chunks.push(DecodedChunk {
            offset,
            header,
            data: decoded,
        });
    }

    Ok(chunks)
}

fn list_chunks(path: &Path, config_path: Option<&Path>) -> Result<usize> {
    let config = match config_path {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };
    let data = open(path)?;
    let chunks = decode_chunks(&data, config.limits.max_chunk_size)?;

    for (index, chunk) in chunks.iter().enumerate() {
        println!(
            "#{index:<3} @{:#010x} {:<14} {:>10} -> {:>10}  {}",
            chunk.offset,
            format!("{:?}", chunk.header.encoding),
            chunk.header.length,
            chunk.data.len(),
            hex::encode(&chunk.data[..chunk.data.len().min(PREVIEW_LEN)])
        );
    }

    Ok(chunks.len())
}
