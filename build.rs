use std::env;
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

// Must match `waveform::TABLE_POWER`.
const TABLE_POWER: u32 = 14;

fn main() {
    let entries = 1usize << TABLE_POWER;
    let quarter = entries / 4;
    // One table unit == one radian of phase.
    let amplitude = entries as f64 / (2.0 * PI);

    let mut src = String::new();
    let _ = writeln!(
        src,
        "/// First quarter period of the waveform, sampled at `2π(i + ½)/N`."
    );
    let _ = writeln!(src, "pub(crate) const COMPACT_SINE: [i16; {quarter}] = [");
    for i in 0..quarter {
        if i % 12 == 0 {
            src.push_str("   ");
        }
        let phase = 2.0 * PI * (i as f64 + 0.5) / entries as f64;
        let v = (amplitude * phase.sin()).round() as i16;
        let _ = write!(src, " {v},");
        if (i + 1) % 12 == 0 {
            src.push('\n');
        }
    }
    src.push_str("\n];\n");

    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let path = PathBuf::from(out_dir).join("compact_sine.rs");
    if let Err(e) = fs::write(&path, src) {
        panic!("write {}: {e}", path.display());
    }

    println!("cargo:rerun-if-changed=build.rs");
}
