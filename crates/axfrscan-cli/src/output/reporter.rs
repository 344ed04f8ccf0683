//! Human-readable scan progress and summary.

use std::fmt::Display;
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use axfrscan_recon::{ScanEvent, ScanObserver, ScanReport};
use colored::{Color, Colorize};

const BANNER_WIDTH: usize = 40;

/// Prints scan progress as it happens.
///
/// In vulnerable-only mode every progress line is suppressed and the
/// summary shrinks to one `[VULN] <zone>` line per vulnerable zone.
pub struct TerminalReporter<W> {
    out: Mutex<W>,
    vuln_only: bool,
    color: bool,
}

impl TerminalReporter<Stdout> {
    /// Reporter writing to stdout
    pub fn stdout(vuln_only: bool, color: bool) -> Self {
        Self::new(io::stdout(), vuln_only, color)
    }
}

impl<W: Write + Send> TerminalReporter<W> {
    /// Reporter writing to `out`
    pub const fn new(out: W, vuln_only: bool, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            vuln_only,
            color,
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&self, text: impl Display) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // A closed stdout must not abort the scan.
        let _ = writeln!(out, "{text}");
    }

    fn say(&self, text: &str, color: Color) {
        self.line(self.paint(text, color));
    }

    /// Start-up banner
    pub fn banner(&self) {
        if self.vuln_only {
            return;
        }

        let title = format!("axfrscan v{}", env!("CARGO_PKG_VERSION"));
        let subtitle = "zone transfer auditor";
        let rule = "═".repeat(BANNER_WIDTH);

        self.say(&format!("╔{rule}╗"), Color::BrightCyan);
        self.say(&format!("║{title:^BANNER_WIDTH$}║"), Color::BrightCyan);
        self.say(&format!("║{subtitle:^BANNER_WIDTH$}║"), Color::BrightCyan);
        self.say(&format!("╚{rule}╝"), Color::BrightCyan);
    }

    /// End-of-scan summary.
    ///
    /// A clean scan is reported explicitly rather than by silence, except in
    /// vulnerable-only mode.
    pub fn summary(&self, report: &ScanReport) {
        if !self.vuln_only {
            self.line("");
            self.say("========== SUMMARY ==========", Color::BrightWhite);
        }

        for zone in &report.vulnerable {
            self.say(&format!("[VULN] {zone}"), Color::BrightRed);
        }

        if self.vuln_only {
            return;
        }

        if report.is_clean() {
            self.say("[✓] No vulnerable domains found", Color::BrightGreen);
        }

        let elapsed = report.finished_at - report.started_at;
        #[allow(clippy::cast_precision_loss)]
        let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
        self.line("");
        self.say(
            &format!(
                "[*] Scan complete: {} zones tested across {} targets in {seconds:.2}s",
                report.zones_tested, report.targets
            ),
            Color::BrightCyan,
        );
    }
}

impl<W: Write + Send> ScanObserver for TerminalReporter<W> {
    fn on_event(&self, event: ScanEvent<'_>) {
        if self.vuln_only {
            return;
        }

        match event {
            ScanEvent::TargetsLoaded { count } => {
                self.say(&format!("[+] Loaded {count} targets"), Color::BrightCyan);
            }
            ScanEvent::TargetStarted { domain } => {
                self.line("");
                self.say(
                    &format!("===== Scanning target: {domain} ====="),
                    Color::BrightWhite,
                );
            }
            ScanEvent::ZoneAlreadyTested { .. } => {}
            ScanEvent::ZoneStarted { zone } => {
                self.line("");
                self.say(
                    &format!("--- Testing zone candidate: {zone} ---"),
                    Color::BrightCyan,
                );
                self.say(&format!("[*] Fetching NS for {zone}"), Color::BrightCyan);
            }
            ScanEvent::NameserversFound { nameservers, .. } => {
                let names: Vec<&str> = nameservers.iter().map(|ns| ns.as_str()).collect();
                self.say(
                    &format!("[*] Found {} nameservers: {}", names.len(), names.join(", ")),
                    Color::BrightCyan,
                );
            }
            ScanEvent::ResolveFailed { zone, error } => {
                self.say(
                    &format!("[-] NS lookup for {zone}: {error}"),
                    Color::BrightYellow,
                );
            }
            ScanEvent::ManagedSkipped { nameserver, .. } => {
                self.say(
                    &format!("[*] Skipping managed DNS: {nameserver}"),
                    Color::BrightCyan,
                );
            }
            ScanEvent::TransferStarted { zone, nameserver } => {
                self.say(
                    &format!("[*] Trying AXFR: {zone} @ {nameserver}"),
                    Color::BrightYellow,
                );
            }
            ScanEvent::TransferFailed {
                zone,
                nameserver,
                failure,
            } => {
                self.say(
                    &format!("[-] AXFR failed: {zone} @ {nameserver}: {failure}"),
                    Color::BrightRed,
                );
            }
            ScanEvent::TransferSucceeded {
                zone,
                nameserver,
                records,
            } => {
                let detail = records.map(|n| format!(" ({n} records)")).unwrap_or_default();
                self.say(
                    &format!("[VULN] AXFR SUCCESS: {zone} @ {nameserver}{detail}"),
                    Color::BrightRed,
                );
            }
            ScanEvent::Saved { path, .. } => {
                self.say(&format!("[+] Saved: {}", path.display()), Color::BrightGreen);
            }
            ScanEvent::SaveFailed { path, error, .. } => {
                self.say(
                    &format!("[!] Could not save {}: {error}", path.display()),
                    Color::BrightRed,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axfrscan_core::{Domain, Nameserver, ScanState, ZoneCandidate};
    use axfrscan_recon::TransferFailure;
    use std::collections::BTreeSet;

    fn report(vulnerable: &[&str]) -> ScanReport {
        let mut state = ScanState::new();
        for zone in vulnerable {
            let zone = ZoneCandidate::new(zone);
            state.mark_tested(&zone);
            state.mark_vulnerable(&zone);
        }
        ScanReport::new(chrono::Utc::now(), 1, &state, Vec::new())
    }

    fn replay(reporter: &TerminalReporter<Vec<u8>>) {
        let domain = Domain::parse("www.example.com");
        let zone = ZoneCandidate::new("example.com");
        let ns = Nameserver::new("ns1.example.com");
        let managed = Nameserver::new("ns-1.awsdns-01.org");
        let nameservers: BTreeSet<Nameserver> = [ns.clone(), managed.clone()].into();

        reporter.on_event(ScanEvent::TargetsLoaded { count: 1 });
        reporter.on_event(ScanEvent::TargetStarted { domain: &domain });
        reporter.on_event(ScanEvent::ZoneStarted { zone: &zone });
        reporter.on_event(ScanEvent::NameserversFound {
            zone: &zone,
            nameservers: &nameservers,
        });
        reporter.on_event(ScanEvent::ManagedSkipped {
            zone: &zone,
            nameserver: &managed,
            signature: "awsdns-",
        });
        reporter.on_event(ScanEvent::TransferStarted {
            zone: &zone,
            nameserver: &ns,
        });
        reporter.on_event(ScanEvent::TransferFailed {
            zone: &zone,
            nameserver: &ns,
            failure: &TransferFailure::Refused,
        });
        reporter.on_event(ScanEvent::TransferSucceeded {
            zone: &zone,
            nameserver: &ns,
            records: Some(12),
        });
    }

    fn output(reporter: TerminalReporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn vuln_only_prints_vulnerable_zones_only() {
        let reporter = TerminalReporter::new(Vec::new(), true, false);
        reporter.banner();
        replay(&reporter);
        reporter.summary(&report(&["example.com", "example.org"]));

        assert_eq!(output(reporter), "[VULN] example.com\n[VULN] example.org\n");
    }

    #[test]
    fn vuln_only_clean_scan_prints_nothing() {
        let reporter = TerminalReporter::new(Vec::new(), true, false);
        replay(&reporter);
        reporter.summary(&report(&[]));

        assert_eq!(output(reporter), "");
    }

    #[test]
    fn progress_lines_in_normal_mode() {
        let reporter = TerminalReporter::new(Vec::new(), false, false);
        replay(&reporter);
        let text = output(reporter);

        assert!(text.contains("[+] Loaded 1 targets"));
        assert!(text.contains("===== Scanning target: www.example.com ====="));
        assert!(text.contains("[*] Fetching NS for example.com"));
        assert!(text.contains("[*] Skipping managed DNS: ns-1.awsdns-01.org"));
        assert!(text.contains("[*] Trying AXFR: example.com @ ns1.example.com"));
        assert!(text.contains("[-] AXFR failed: example.com @ ns1.example.com: transfer refused"));
        assert!(text.contains("[VULN] AXFR SUCCESS: example.com @ ns1.example.com (12 records)"));
    }

    #[test]
    fn clean_summary_is_explicit() {
        let reporter = TerminalReporter::new(Vec::new(), false, false);
        reporter.summary(&report(&[]));
        let text = output(reporter);

        assert!(text.contains("SUMMARY"));
        assert!(text.contains("[✓] No vulnerable domains found"));
        assert!(text.contains("[*] Scan complete: 0 zones tested across 1 targets"));
    }

    #[test]
    fn banner_shows_version() {
        let reporter = TerminalReporter::new(Vec::new(), false, false);
        reporter.banner();
        assert!(output(reporter).contains(env!("CARGO_PKG_VERSION")));
    }
}
