// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

// Records are delimited by '>'. Whatever precedes the first '>' is ignored. Within a record, the
// first line is the header and the rest is the sequence, with line breaks dropped. No other
// cleanup is done: stray blanks or digits stay in the sequence, where validation will catch them.
pub fn parse_fasta(text: &str) -> SeqFile {
    let mut result: SeqFile = Vec::new();
    for chunk in text.split('>').skip(1) {
        let (header, body) = chunk.split_once('\n').unwrap_or((chunk, ""));
        let sequence: String = body.chars().filter(|&c| c != '\n' && c != '\r').collect();
        result.push(SeqRecord {
            header: String::from(header.trim_end_matches('\r')),
            sequence,
        });
    }
    debug!("parsed {} FastA record(s)", result.len());
    result
}

pub fn read_fasta<R: Read>(mut reader: R) -> Result<SeqFile, std::io::Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_fasta(&text))
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, std::io::Error> {
    let text = fs::read_to_string(path)?;
    Ok(parse_fasta(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fasta_two_records() {
        let fasta = parse_fasta(">s1\nAAAA\n>s2\nCCCC");
        assert_eq!(fasta.len(), 2);
        assert_eq!(fasta[0].header, "s1");
        assert_eq!(fasta[0].sequence, "AAAA");
        assert_eq!(fasta[1].header, "s2");
        assert_eq!(fasta[1].sequence, "CCCC");
    }

    #[test]
    fn test_parse_fasta_multiline() {
        let fasta = parse_fasta(">Some larger record, with several lines\nMKTAY\nIAKQR\nQISFV\n");
        assert_eq!(fasta.len(), 1);
        assert_eq!(fasta[0].header, "Some larger record, with several lines");
        assert_eq!(fasta[0].sequence, "MKTAYIAKQRQISFV");
    }

    #[test]
    fn test_parse_fasta_crlf() {
        let fasta = parse_fasta(">s1\r\nAC\r\nDE\r\n");
        assert_eq!(fasta[0].header, "s1");
        assert_eq!(fasta[0].sequence, "ACDE");
    }

    #[test]
    fn test_parse_fasta_ignores_leading_text() {
        let fasta = parse_fasta("MKT\n>s1\nAAAA\n");
        assert_eq!(fasta.len(), 1);
        assert_eq!(fasta[0].sequence, "AAAA");
    }

    #[test]
    fn test_parse_fasta_no_header() {
        assert!(parse_fasta("MKTAYIAKQR").is_empty());
        assert!(parse_fasta("").is_empty());
    }

    #[test]
    fn test_parse_fasta_header_only() {
        let fasta = parse_fasta(">lonely");
        assert_eq!(fasta.len(), 1);
        assert_eq!(fasta[0].header, "lonely");
        assert!(fasta[0].is_empty());
    }

    #[test]
    fn test_read_fasta_from_reader() {
        let input = b">a\nMK\n>b\nTA\n";
        let fasta = read_fasta(&input[..]).expect("read from slice");
        assert_eq!(fasta.len(), 2);
        assert_eq!(fasta[1].sequence, "TA");
    }
}
