use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;

use entail_mine::tokenize::tokenize;

#[derive(Parser, Debug)]
#[clap(
    name = "tokenize",
    about = "A program to dump the tokenization of a text file, one line at a time."
)]
struct Args {
    /// File path to the text to be tokenized.
    #[clap(short = 'i', long)]
    text_path: PathBuf,

    /// Keep the surface form: no lower-casing or digit normalization.
    #[clap(short = 'r', long)]
    raw: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let rdr = BufReader::new(File::open(&args.text_path)?);
    for line in rdr.lines() {
        let line = line?;
        println!("{}", tokenize(&line, !args.raw).join(" "));
    }
    Ok(())
}
