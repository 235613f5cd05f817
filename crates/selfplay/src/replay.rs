//! Replay buffer and append-only replay log.
//!
//! The buffer is a bounded FIFO of `(state, distribution)` training
//! samples: the oldest samples are evicted first once capacity is
//! reached. Under the sequential training model it has a single writer
//! and a single reader, so no locking is involved.
//!
//! The log persists samples as one line each:
//! `<cell values,...>,<player>;<distribution floats,...>`. Flushes only
//! ever append; prior lines are never rewritten.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use hexzero_hex::HexState;
use rand::Rng;

/// One training sample: the state a search was run from and the
/// normalized visit-count distribution the search produced.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplaySample {
    pub state: HexState,
    /// One entry per board cell, summing to 1 over the moves that were
    /// legal when the sample was recorded, 0 elsewhere.
    pub distribution: Vec<f32>,
}

/// Bounded FIFO store of training samples.
pub struct ReplayBuffer {
    capacity: usize,
    samples: VecDeque<ReplaySample>,
}

impl ReplayBuffer {
    /// Create a buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting the oldest one at capacity.
    pub fn push(&mut self, sample: ReplaySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Iterate over the stored samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ReplaySample> {
        self.samples.iter()
    }

    /// The `n` most recently added samples, oldest of them first.
    pub fn last_n(&self, n: usize) -> impl Iterator<Item = &ReplaySample> {
        self.samples.iter().skip(self.samples.len().saturating_sub(n))
    }

    /// Draw up to `count` samples uniformly at random, without
    /// replacement within the batch. Returns fewer when the buffer holds
    /// fewer.
    pub fn sample<'a, R: Rng>(&'a self, rng: &mut R, count: usize) -> Vec<&'a ReplaySample> {
        let count = count.min(self.samples.len());
        rand::seq::index::sample(rng, self.samples.len(), count)
            .into_iter()
            .map(|i| &self.samples[i])
            .collect()
    }
}

fn format_sample(sample: &ReplaySample) -> String {
    let mut fields: Vec<String> = sample
        .state
        .raw_cells()
        .iter()
        .map(u8::to_string)
        .collect();
    fields.push(sample.state.to_move().index().to_string());

    let probs: Vec<String> = sample.distribution.iter().map(f32::to_string).collect();
    format!("{};{}", fields.join(","), probs.join(","))
}

fn parse_sample(line: &str) -> Result<ReplaySample> {
    let (state_part, probs_part) = match line.split_once(';') {
        Some(parts) => parts,
        None => bail!("replay line has no ';' separator: {:?}", line),
    };

    let fields = state_part
        .split(',')
        .map(|f| f.trim().parse::<u8>().context("invalid board field"))
        .collect::<Result<Vec<u8>>>()?;
    let (&player, cells) = match fields.split_last() {
        Some(parts) => parts,
        None => bail!("replay line has an empty state: {:?}", line),
    };
    let state = HexState::from_raw(cells, player)?;

    let distribution = probs_part
        .split(',')
        .map(|f| f.trim().parse::<f32>().context("invalid distribution field"))
        .collect::<Result<Vec<f32>>>()?;

    Ok(ReplaySample {
        state,
        distribution,
    })
}

/// Append samples to the replay log, creating it if needed.
pub fn append_samples<'a>(
    path: &Path,
    samples: impl Iterator<Item = &'a ReplaySample>,
) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open replay log {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for sample in samples {
        writeln!(writer, "{}", format_sample(sample))
            .with_context(|| format!("failed to write replay log {:?}", path))?;
    }
    writer.flush().context("failed to flush replay log")
}

/// Load every sample from the replay log, oldest first.
///
/// A missing log is not an error: resuming without one starts from an
/// empty buffer.
pub fn load_samples(path: &Path) -> Result<Vec<ReplaySample>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to open replay log {:?}", path))
        }
    };

    let mut samples = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.context("failed to read replay log line")?;
        if line.is_empty() {
            continue;
        }
        samples.push(parse_sample(&line)?);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample(tag: u8) -> ReplaySample {
        // Distinct samples by stone placement; 3x3 board.
        let mut cells = [0u8; 9];
        cells[(tag % 9) as usize] = 1;
        ReplaySample {
            state: HexState::from_raw(&cells, 1).unwrap(),
            distribution: vec![f32::from(tag), 0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.75],
        }
    }

    #[test]
    fn test_fifo_eviction_keeps_latest() {
        let mut buffer = ReplayBuffer::new(3);
        for tag in 0..5 {
            buffer.push(sample(tag));
        }

        assert_eq!(buffer.len(), 3);
        let kept: Vec<_> = buffer.iter().cloned().collect();
        assert_eq!(kept, vec![sample(2), sample(3), sample(4)]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut buffer = ReplayBuffer::new(4);
        for tag in 0..20 {
            buffer.push(sample(tag));
            assert!(buffer.len() <= 4);
        }
    }

    #[test]
    fn test_last_n() {
        let mut buffer = ReplayBuffer::new(10);
        for tag in 0..6 {
            buffer.push(sample(tag));
        }

        let tail: Vec<_> = buffer.last_n(2).cloned().collect();
        assert_eq!(tail, vec![sample(4), sample(5)]);

        // Asking for more than stored yields everything.
        assert_eq!(buffer.last_n(100).count(), 6);
    }

    #[test]
    fn test_sample_without_replacement() {
        let mut buffer = ReplayBuffer::new(10);
        for tag in 0..8 {
            buffer.push(sample(tag));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let batch = buffer.sample(&mut rng, 5);
        assert_eq!(batch.len(), 5);

        // No duplicates within a batch.
        for (i, a) in batch.iter().enumerate() {
            for b in &batch[i + 1..] {
                assert!(!std::ptr::eq(*a, *b));
            }
        }

        // Requesting more than stored caps at the buffer size.
        assert_eq!(buffer.sample(&mut rng, 100).len(), 8);
    }

    #[test]
    fn test_log_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replays.txt");

        let first: Vec<ReplaySample> = (0..3).map(sample).collect();
        let second: Vec<ReplaySample> = (3..5).map(sample).collect();

        append_samples(&path, first.iter()).unwrap();
        append_samples(&path, second.iter()).unwrap();

        let loaded = load_samples(&path).unwrap();
        let expected: Vec<ReplaySample> = (0..5).map(sample).collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_samples(&dir.path().join("absent.txt")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_sample("no separator here").is_err());
        assert!(parse_sample("1,2,x,0;0.5,0.5").is_err());
        assert!(parse_sample("0,0,0,0,0,0,0,0,0,0;nan-ish,oops").is_err());
    }

    #[test]
    fn test_format_matches_raw_layout() {
        let s = sample(1);
        let line = format_sample(&s);
        let (state_part, _) = line.split_once(';').unwrap();

        // Nine cells then the player id.
        assert_eq!(state_part.split(',').count(), 10);
        assert!(state_part.ends_with(",1"));
    }
}
