//! Decoding of the mpileup base-call column.
//!
//! Decoding is split into three pure steps:
//!
//! 1. [`tokenize`] turns the base-call string into [`Token`]s, separating read
//!    symbols from read start/end markers and indel markers.
//! 2. [`realign_qualities`] inserts placeholder qualities for every inserted
//!    base so the quality list lines up with the symbols again.
//! 3. [`decode_calls`] walks both in lockstep and emits one [`Call`] per
//!    aligned base.

use crate::error::{Result, StatsError};
use crate::pileup::line::{decode_qualities, PileupLine};
use crate::pileup::{Base, DecodeOptions, Strand};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A read symbol that carries a quality value.
    Symbol(u8),
    /// `^` followed by the read's mapping quality character.
    ReadStart(u8),
    /// `$`
    ReadEnd,
    /// `+N<seq>`
    Insertion(String),
    /// `-N<seq>`
    Deletion(String),
}

impl Token {
    /// Number of entries this token occupies in a realigned quality list.
    fn quality_slots(&self) -> usize {
        match self {
            Token::Symbol(_) => 1,
            Token::Insertion(seq) => seq.len(),
            _ => 0,
        }
    }
}

/// One aligned base with its qualities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub base: Base,
    pub strand: Strand,
    pub base_quality: u8,
    pub mapping_quality: u8,
}

pub fn tokenize(calls: &str) -> Result<Vec<Token>> {
    let bytes = calls.as_bytes();
    let mut tokens = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'^' => {
                let mapq = *bytes.get(i + 1).ok_or_else(|| {
                    StatsError::Parse(format!("read start marker without mapping quality in {:?}", calls))
                })?;
                tokens.push(Token::ReadStart(mapq));
                i += 2;
            }
            b'$' => {
                tokens.push(Token::ReadEnd);
                i += 1;
            }
            marker @ (b'+' | b'-') => {
                let digits = bytes[i + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits == 0 {
                    return Err(StatsError::Parse(format!(
                        "indel marker without length at offset {} in {:?}",
                        i, calls
                    )));
                }
                let start = i + 1 + digits;
                let len: usize = calls[i + 1..start]
                    .parse()
                    .map_err(|e| StatsError::Parse(format!("bad indel length in {:?}: {}", calls, e)))?;
                let end = start
                    .checked_add(len)
                    .filter(|&end| end <= bytes.len())
                    .ok_or_else(|| {
                        StatsError::Parse(format!(
                            "indel of length {} runs past the end of {:?}",
                            len, calls
                        ))
                    })?;
                let seq = String::from_utf8_lossy(&bytes[start..end]).into_owned();
                tokens.push(if marker == b'+' {
                    Token::Insertion(seq)
                } else {
                    Token::Deletion(seq)
                });
                i = end;
            }
            symbol => {
                tokens.push(Token::Symbol(symbol));
                i += 1;
            }
        }
    }

    Ok(tokens)
}

/// Insert `placeholder` qualities for every inserted base in `calls`.
///
/// Each `+N` marker gets N placeholders at the index equal to the number of
/// quality-bearing symbols before it, so `abc+2aag` with `[1, 1, 1, 1]` becomes
/// `[1, 1, 1, 0, 0, 1]`. Deletion markers are rejected.
pub fn realign_qualities(calls: &str, qualities: &[u8], placeholder: u8) -> Result<Vec<u8>> {
    realign_tokens(&tokenize(calls)?, qualities, placeholder)
}

fn realign_tokens(tokens: &[Token], qualities: &[u8], placeholder: u8) -> Result<Vec<u8>> {
    let mut insertions = Vec::new();
    let mut slot = 0;
    for token in tokens {
        match token {
            Token::Deletion(seq) => {
                return Err(StatsError::UnsupportedOperation(format!(
                    "deletion marker -{}{} cannot be decoded",
                    seq.len(),
                    seq
                )));
            }
            Token::Insertion(seq) => insertions.push((slot, seq.len())),
            _ => {}
        }
        slot += token.quality_slots();
    }

    let inserted: usize = insertions.iter().map(|&(_, n)| n).sum();
    let mut realigned = Vec::with_capacity(qualities.len() + inserted);
    let mut source = qualities.iter().copied();
    for (at, n) in insertions {
        while realigned.len() < at {
            match source.next() {
                Some(q) => realigned.push(q),
                None => break,
            }
        }
        realigned.extend(std::iter::repeat(placeholder).take(n));
    }
    realigned.extend(source);

    Ok(realigned)
}

/// Decode one pileup line into aligned calls.
///
/// `.` and `,` resolve to the reference base. Symbols that are not aligned
/// bases (reference skips, unknown characters) consume their quality and are
/// dropped.
pub fn decode_calls(line: &PileupLine, options: &DecodeOptions) -> Result<Vec<Call>> {
    // samtools writes `0 * *` for a covered position whose bases were all dropped
    if line.depth == 0 && line.calls == "*" {
        return Ok(Vec::new());
    }

    let tokens = tokenize(&line.calls)?;
    let slots: usize = tokens.iter().map(Token::quality_slots).sum();

    let misaligned = |qualities: usize| StatsError::MisalignedQuality {
        symbols: slots,
        qualities,
        line: format!("{}:{} {}", line.reference, line.position, line.calls),
    };

    let base_qualities = realign_tokens(
        &tokens,
        &decode_qualities(&line.base_qualities, options.quality_offset)?,
        options.placeholder_quality,
    )?;
    if base_qualities.len() != slots {
        return Err(misaligned(base_qualities.len()));
    }

    let mapping_qualities = match &line.mapping_qualities {
        Some(encoded) => {
            let realigned = realign_tokens(
                &tokens,
                &decode_qualities(encoded, options.quality_offset)?,
                options.placeholder_quality,
            )?;
            if realigned.len() != slots {
                return Err(misaligned(realigned.len()));
            }
            Some(realigned)
        }
        None => None,
    };

    if line.depth as usize != slots {
        debug!(
            "{}:{} reports depth {} but carries {} quality-bearing symbols",
            line.reference, line.position, line.depth, slots
        );
    }

    let mut qualities = base_qualities
        .iter()
        .copied()
        .zip(mapping_qualities.as_deref().unwrap_or(&base_qualities[..]).iter().copied());

    let mut calls = Vec::with_capacity(slots);
    for token in &tokens {
        match token {
            Token::Symbol(symbol) => {
                let (base_quality, mapping_quality) =
                    qualities.next().ok_or_else(|| misaligned(base_qualities.len()))?;
                let base = match symbol {
                    b'.' | b',' => Base::from_symbol(line.reference_base),
                    other => Base::from_symbol(*other),
                };
                match base {
                    Some(base) => calls.push(Call {
                        base,
                        strand: Strand::of_symbol(*symbol),
                        base_quality,
                        mapping_quality,
                    }),
                    None => debug!(
                        "{}:{} dropping non-base symbol {:?}",
                        line.reference, line.position, *symbol as char
                    ),
                }
            }
            Token::Insertion(seq) => {
                if qualities.by_ref().take(seq.len()).count() != seq.len() {
                    return Err(misaligned(base_qualities.len()));
                }
            }
            Token::Deletion(seq) => {
                return Err(StatsError::UnsupportedOperation(format!(
                    "deletion marker -{}{} cannot be decoded",
                    seq.len(),
                    seq
                )));
            }
            Token::ReadStart(_) | Token::ReadEnd => {}
        }
    }

    if qualities.next().is_some() {
        return Err(misaligned(base_qualities.len()));
    }

    Ok(calls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(calls: &str, quals: &str) -> PileupLine {
        PileupLine {
            reference: "ref".to_string(),
            position: 1,
            reference_base: b'A',
            depth: quals.len() as u32,
            calls: calls.to_string(),
            base_qualities: quals.to_string(),
            mapping_qualities: None,
        }
    }

    #[test]
    fn test_tokenize_markers() {
        let tokens = tokenize("^]A$c+3ACGt").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::ReadStart(b']'),
                Token::Symbol(b'A'),
                Token::ReadEnd,
                Token::Symbol(b'c'),
                Token::Insertion("ACG".to_string()),
                Token::Symbol(b't'),
            ]
        );
    }

    #[test]
    fn test_tokenize_multi_digit_insertion() {
        let tokens = tokenize("A+12AAAAAAAAAAAAG").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::Insertion("A".repeat(12)));
        assert_eq!(tokens[2], Token::Symbol(b'G'));
    }

    #[test]
    fn test_tokenize_rejects_truncated_markers() {
        assert!(matches!(tokenize("A+"), Err(StatsError::Parse(_))));
        assert!(matches!(tokenize("A+3AC"), Err(StatsError::Parse(_))));
        assert!(matches!(tokenize("A^"), Err(StatsError::Parse(_))));
        assert!(matches!(
            tokenize("A+18446744073709551615A"),
            Err(StatsError::Parse(_))
        ));
    }

    #[test]
    fn test_realign_insert_in_middle() {
        let quals = [1, 1, 1, 1];
        assert_eq!(
            realign_qualities("abc+2aag", &quals, 0).unwrap(),
            vec![1, 1, 1, 0, 0, 1]
        );
    }

    #[test]
    fn test_realign_insert_at_beginning() {
        let quals = [1, 1, 1, 1];
        assert_eq!(
            realign_qualities("+2aaAAAA", &quals, 0).unwrap(),
            vec![0, 0, 1, 1, 1, 1]
        );
    }

    #[test]
    fn test_realign_insert_at_end() {
        let quals = [1, 1, 1, 1];
        assert_eq!(
            realign_qualities("AAAA+2aa", &quals, 0).unwrap(),
            vec![1, 1, 1, 1, 0, 0]
        );
    }

    #[test]
    fn test_realign_uses_placeholder_and_keeps_order() {
        let quals = [10, 20, 30];
        assert_eq!(
            realign_qualities("^]A+1cG$T", &quals, 7).unwrap(),
            vec![10, 7, 20, 30]
        );
    }

    #[test]
    fn test_realign_rejects_deletions() {
        let quals = [1, 1, 1, 1];
        assert!(matches!(
            realign_qualities("AA-2aaAA", &quals, 0),
            Err(StatsError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_decode_without_indels_matches_depth() {
        let l = line("^]GgnG$gt", "CB#GHH");
        let calls = decode_calls(&l, &DecodeOptions::default()).unwrap();
        assert_eq!(calls.len(), l.depth as usize);
        let bases: String = calls.iter().map(|c| c.base.as_char()).collect();
        assert_eq!(bases, "GGNGGT");
        let quals: Vec<u8> = calls.iter().map(|c| c.base_quality).collect();
        assert_eq!(quals, vec![34, 33, 2, 38, 39, 39]);
        assert_eq!(calls[1].strand, Strand::Reverse);
        assert_eq!(calls[0].strand, Strand::Forward);
    }

    #[test]
    fn test_decode_insertion_contributes_no_calls() {
        let l = line("AA+2ttC", "III");
        let calls = decode_calls(&l, &DecodeOptions::default()).unwrap();
        let bases: String = calls.iter().map(|c| c.base.as_char()).collect();
        assert_eq!(bases, "AAC");
        assert!(calls.iter().all(|c| c.base_quality == 40));
    }

    #[test]
    fn test_decode_matches_resolve_to_reference() {
        let l = line(".,T", "III");
        let calls = decode_calls(&l, &DecodeOptions::default()).unwrap();
        let bases: String = calls.iter().map(|c| c.base.as_char()).collect();
        assert_eq!(bases, "AAT");
        assert_eq!(calls[1].strand, Strand::Reverse);
    }

    #[test]
    fn test_decode_drops_reference_skips() {
        let l = line("A>G", "I#I");
        let calls = decode_calls(&l, &DecodeOptions::default()).unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.base_quality == 40));
    }

    #[test]
    fn test_decode_uses_mapping_quality_column() {
        let mut l = line("AcG", "III");
        l.mapping_qualities = Some("]]+".to_string());
        let calls = decode_calls(&l, &DecodeOptions::default()).unwrap();
        let mapq: Vec<u8> = calls.iter().map(|c| c.mapping_quality).collect();
        assert_eq!(mapq, vec![60, 60, 10]);
    }

    #[test]
    fn test_decode_mapping_quality_defaults_to_base_quality() {
        let l = line("AcG", "I5+");
        let calls = decode_calls(&l, &DecodeOptions::default()).unwrap();
        assert!(calls.iter().all(|c| c.mapping_quality == c.base_quality));
    }

    #[test]
    fn test_decode_misaligned_qualities() {
        let short = line("AAAA", "III");
        assert!(matches!(
            decode_calls(&short, &DecodeOptions::default()),
            Err(StatsError::MisalignedQuality { symbols: 4, qualities: 3, .. })
        ));
        let long = line("AA", "III");
        assert!(matches!(
            decode_calls(&long, &DecodeOptions::default()),
            Err(StatsError::MisalignedQuality { symbols: 2, qualities: 3, .. })
        ));
    }

    #[test]
    fn test_decode_misaligned_mapping_qualities() {
        let mut l = line("AcG", "III");
        l.mapping_qualities = Some("]]".to_string());
        assert!(matches!(
            decode_calls(&l, &DecodeOptions::default()),
            Err(StatsError::MisalignedQuality { symbols: 3, qualities: 2, .. })
        ));
    }

    #[test]
    fn test_decode_empty_column_has_no_calls() {
        let mut l = line("*", "*");
        l.depth = 0;
        l.mapping_qualities = Some("*".to_string());
        assert!(decode_calls(&l, &DecodeOptions::default()).unwrap().is_empty());

        // a real gap call still counts
        let gap = line("*", "I");
        assert_eq!(decode_calls(&gap, &DecodeOptions::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_deletion_is_unsupported() {
        let l = line("A-1cA", "II");
        assert!(matches!(
            decode_calls(&l, &DecodeOptions::default()),
            Err(StatsError::UnsupportedOperation(_))
        ));
    }
}
