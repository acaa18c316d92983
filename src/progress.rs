//! Periodic progress reporting for the three long-running operations.

/// Reports "processed N positions" every `period` positions, if a period was
/// requested.
pub struct ProgressReporter {
    period: Option<u64>,
    next_checkpoint: Option<u64>,
}

impl ProgressReporter {
    /// `period`, if given, must be at least 1.
    pub fn new(period: Option<u64>) -> Self {
        assert!(period.map_or(true, |p| p >= 1), "progress period must be positive");
        ProgressReporter { period, next_checkpoint: period }
    }

    /// Call after finishing position `positions_processed - 1`, i.e. with the
    /// count of positions processed so far.
    pub fn tick(&mut self, positions_processed: u64) {
        if self.next_checkpoint == Some(positions_processed) {
            println!("Progress status: processed {} positions", group_thousands(positions_processed));
            self.next_checkpoint = Some(positions_processed + self.period.unwrap());
        }
    }

    pub fn done(&self) {
        println!("Done");
    }
}

pub fn report_verification_ok() {
    println!("Verification OK");
}

/// Formats `n` with a space every three digits, matching
/// `f"{n:,}".replace(",", " ")`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_inserts_spaces() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1 000");
        assert_eq!(group_thousands(1_234_567), "1 234 567");
    }

    #[test]
    fn ticks_fire_on_multiples_of_period() {
        let mut reporter = ProgressReporter::new(Some(2));
        assert_eq!(reporter.next_checkpoint, Some(2));
        reporter.tick(1);
        assert_eq!(reporter.next_checkpoint, Some(2));
        reporter.tick(2);
        assert_eq!(reporter.next_checkpoint, Some(4));
    }

    #[test]
    fn no_period_means_no_checkpoints() {
        let mut reporter = ProgressReporter::new(None);
        reporter.tick(1);
        reporter.tick(1_000_000);
        assert_eq!(reporter.next_checkpoint, None);
    }
}
