//! Transcript output.

use alertsim_simulation::Transcript;
use std::io::{self, Write};

/// Write every transcript line to `out`, one per line, then flush.
pub fn write_transcript(transcript: &Transcript, out: &mut impl Write) -> io::Result<()> {
    for entry in transcript {
        writeln!(out, "{entry}")?;
    }
    out.flush()
}
