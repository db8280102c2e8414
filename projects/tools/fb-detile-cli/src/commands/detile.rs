use crate::error::CliError;
use crate::util::{
    create_output_mapping, open_read_handle, open_readonly_mmap, open_write_handle, Throughput,
};
use argh::FromArgs;
use bytesize::ByteSize;
use fb_detile::{DetileError, DetileMode, FrameGeometry};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(FromArgs, Debug)]
/// Convert a tiled framebuffer dump into row-major pixel order
pub struct DetileCmd {
    /// tiled framebuffer dump to read
    #[argh(positional)]
    pub input: PathBuf,

    /// where to write the row-major frame
    #[argh(positional)]
    pub output: PathBuf,

    /// frame width in pixels, a multiple of 32 [default: 1280]
    #[argh(option, default = "FrameGeometry::DEFAULT.width()")]
    pub width: usize,

    /// frame height in pixels, a multiple of 64 [default: 768]
    #[argh(option, default = "FrameGeometry::DEFAULT.height()")]
    pub height: usize,

    /// decode rows of macro-tiles on all cores
    #[argh(switch)]
    pub parallel: bool,

    /// don't print the summary
    #[argh(switch, short = 'q')]
    pub quiet: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetileSummary {
    pub geometry: FrameGeometry,
    pub bytes: u64,
    pub elapsed: Duration,
}

pub fn handle_detile_command(cmd: &DetileCmd) -> Result<(), CliError> {
    let summary = detile_file(cmd)?;

    if !cmd.quiet {
        println!(
            "Detiled {}x{} frame: {} -> {}",
            summary.geometry.width(),
            summary.geometry.height(),
            cmd.input.display(),
            cmd.output.display()
        );
        println!("Time taken: {:.2?}", summary.elapsed);
        println!("Data processed: {}", ByteSize(summary.bytes));
        println!(
            "Throughput: {}",
            Throughput::measure(summary.bytes, summary.elapsed)
        );
    }

    Ok(())
}

/// Reads the tiled frame, detiles it and writes the result.
///
/// The input size is checked before any file is mapped or created. The frame is decoded
/// straight into a mapping of the output file, which is removed again if decoding fails.
pub fn detile_file(cmd: &DetileCmd) -> Result<DetileSummary, CliError> {
    let geometry = FrameGeometry::new(cmd.width, cmd.height)?;
    let mode = select_mode(cmd.parallel);

    let metadata = fs::metadata(&cmd.input).map_err(|source| CliError::Io {
        path: cmd.input.clone(),
        source,
    })?;
    let input_size = metadata.len();
    let frame_bytes = geometry.frame_bytes();
    if input_size != frame_bytes as u64 {
        return Err(DetileError::InputSizeMismatch {
            expected: frame_bytes,
            actual: usize::try_from(input_size).unwrap_or(usize::MAX),
        }
        .into());
    }

    let start = Instant::now();
    let input_handle = open_read_handle(&cmd.input)?;
    let input_mapping = open_readonly_mmap(&input_handle, &cmd.input, frame_bytes)?;

    let output_handle = open_write_handle(&cmd.output, frame_bytes)?;
    let result = create_output_mapping(&output_handle, &cmd.output, frame_bytes)
        .and_then(|mut output| {
            mode.detile_bytes(input_mapping.as_slice(), output.as_mut_slice(), geometry)
                .map_err(CliError::from)
        });
    drop(output_handle);

    if let Err(e) = result {
        // Don't leave a partially written frame behind.
        let _ = fs::remove_file(&cmd.output);
        return Err(e);
    }

    Ok(DetileSummary {
        geometry,
        bytes: input_size,
        elapsed: start.elapsed(),
    })
}

#[cfg(feature = "multithreaded")]
fn select_mode(parallel: bool) -> DetileMode {
    if parallel {
        DetileMode::Parallel
    } else {
        DetileMode::Sequential
    }
}

#[cfg(not(feature = "multithreaded"))]
fn select_mode(parallel: bool) -> DetileMode {
    if parallel {
        eprintln!("Note: built without the `multithreaded` feature, decoding on a single thread.");
    }
    DetileMode::Sequential
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn command(input: &Path, output: &Path, width: usize, height: usize) -> DetileCmd {
        DetileCmd {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width,
            height,
            parallel: false,
            quiet: true,
        }
    }

    /// Tiled frame where word `k` holds `k`, in native byte order.
    fn traced_frame_bytes(geometry: FrameGeometry) -> Vec<u8> {
        (0..geometry.pixel_count() as u32)
            .flat_map(|x| x.to_ne_bytes())
            .collect()
    }

    #[test]
    fn writes_detiled_frame() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cb.bin");
        let output = dir.path().join("out.bin");
        let geometry = FrameGeometry::new(128, 128).unwrap();
        let tiled = traced_frame_bytes(geometry);
        fs::write(&input, &tiled).unwrap();

        let summary = detile_file(&command(&input, &output, 128, 128)).unwrap();

        let mut expected = vec![0u8; tiled.len()];
        fb_detile::detile_frame_bytes(&tiled, &mut expected, geometry).unwrap();
        let written = fs::read(&output).unwrap();
        assert_eq!(written.len(), tiled.len());
        assert_eq!(written, expected);
        assert_eq!(summary.bytes, tiled.len() as u64);
        assert_eq!(summary.geometry, geometry);
    }

    #[test]
    fn parallel_switch_writes_same_frame() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cb.bin");
        let sequential = dir.path().join("sequential.bin");
        let parallel = dir.path().join("parallel.bin");
        fs::write(&input, traced_frame_bytes(FrameGeometry::DEFAULT)).unwrap();

        detile_file(&command(&input, &sequential, 1280, 768)).unwrap();
        let mut cmd = command(&input, &parallel, 1280, 768);
        cmd.parallel = true;
        detile_file(&cmd).unwrap();

        assert_eq!(fs::read(&sequential).unwrap(), fs::read(&parallel).unwrap());
    }

    #[test]
    fn rejects_frame_one_byte_short_without_creating_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cb.bin");
        let output = dir.path().join("out.bin");
        fs::write(&input, vec![0u8; 3_932_159]).unwrap();

        let error = detile_file(&command(&input, &output, 1280, 768)).unwrap_err();

        assert!(matches!(
            error,
            CliError::Detile(DetileError::InputSizeMismatch {
                expected: 3_932_160,
                actual: 3_932_159
            })
        ));
        assert_eq!(error.exit_code(), crate::error::EXIT_INVALID_ARGUMENT);
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_reports_os_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("does-not-exist.bin");
        let output = dir.path().join("out.bin");

        let error = detile_file(&command(&input, &output, 1280, 768)).unwrap_err();

        let CliError::Io { path, source } = &error else {
            panic!("expected an I/O error, got {error:?}");
        };
        assert_eq!(path, &input);
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(
            error.exit_code(),
            source.raw_os_error().unwrap() as u8
        );
    }

    #[test]
    fn unwritable_output_reports_os_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cb.bin");
        let output = dir.path().join("missing-dir").join("out.bin");
        fs::write(&input, vec![0u8; 8192]).unwrap();

        let error = detile_file(&command(&input, &output, 32, 64)).unwrap_err();

        assert!(matches!(&error, CliError::Open { path, .. } if path == &output));
        assert_ne!(error.exit_code(), 0);
        #[cfg(unix)]
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn replaces_larger_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cb.bin");
        let output = dir.path().join("out.bin");
        let geometry = FrameGeometry::new(32, 64).unwrap();
        let tiled = traced_frame_bytes(geometry);
        fs::write(&input, &tiled).unwrap();
        fs::write(&output, vec![0xEEu8; 3 * tiled.len()]).unwrap();

        detile_file(&command(&input, &output, 32, 64)).unwrap();

        let mut expected = vec![0u8; tiled.len()];
        fb_detile::detile_frame_bytes(&tiled, &mut expected, geometry).unwrap();
        assert_eq!(fs::read(&output).unwrap(), expected);
    }

    #[test]
    fn rejects_unaligned_geometry() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cb.bin");
        let output = dir.path().join("out.bin");

        let error = detile_file(&command(&input, &output, 1366, 768)).unwrap_err();

        assert!(matches!(
            error,
            CliError::Detile(DetileError::InvalidGeometry {
                width: 1366,
                height: 768
            })
        ));
    }

    #[test]
    fn parses_positional_paths_with_defaults() {
        let cmd = DetileCmd::from_args(&["fb-detile"], &["cb.bin", "out.bin"]).unwrap();

        assert_eq!(cmd.input, PathBuf::from("cb.bin"));
        assert_eq!(cmd.output, PathBuf::from("out.bin"));
        assert_eq!(cmd.width, 1280);
        assert_eq!(cmd.height, 768);
        assert!(!cmd.parallel);
        assert!(!cmd.quiet);
    }

    #[test]
    fn parses_options() {
        let cmd = DetileCmd::from_args(
            &["fb-detile"],
            &["cb.bin", "out.bin", "--width", "64", "--height", "128", "--parallel", "-q"],
        )
        .unwrap();

        assert_eq!((cmd.width, cmd.height), (64, 128));
        assert!(cmd.parallel);
        assert!(cmd.quiet);
    }

    #[test]
    fn wrong_argument_count_is_a_usage_error() {
        for args in [&[][..], &["cb.bin"][..], &["cb.bin", "out.bin", "extra"][..]] {
            let early_exit = DetileCmd::from_args(&["fb-detile"], args).unwrap_err();
            assert_eq!(early_exit.status, Err(()), "args: {args:?}");
        }
    }
}
