use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Duration;

use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use shared::{
    info,
    Context,
    FrameRange,
    Result,
};

use crate::core::TrajectorySource;
use crate::convert::{
    config::ConvertConfig,
    dump,
    h5source::H5Trajectory,
};


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Frames written to the dump.
    pub written: usize,
    /// Requested frames that lay beyond the stored trajectory.
    pub skipped: usize,
}


fn spinner() -> Result<ProgressBar> {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")?);
    bar.enable_steady_tick(Duration::from_millis(120));
    Ok(bar)
}


/// Stream the frames selected by `range` from `source` into `out`.
///
/// The box is read once up front. `progress` is refreshed after every
/// `progress_every` written frames; the warnings for frames past the end of
/// the trajectory are logged with the bar suspended.
pub fn convert_frames<S, W>(source: &S, out: &mut W, range: &FrameRange,
                            progress_every: usize, progress: &ProgressBar) -> Result<ConvertSummary>
where S: TrajectorySource,
      W: Write,
{
    let nframes = source.count_frames();
    let steps = range.steps(nframes)?;
    let box_edges = source.read_box_edges()?;
    let progress_every = progress_every.max(1);

    let mut summary = ConvertSummary::default();
    for istep in steps {
        let frame = if istep < nframes {
            source.read_frame(istep, &box_edges)?
        } else {
            progress.suspend(|| source.read_frame(istep, &box_edges))?
        };

        let frame = match frame {
            Some(frame) => frame,
            None => {
                summary.skipped += 1;
                continue;
            },
        };

        dump::write_frame(out, &frame, &box_edges)
            .with_context(|| format!("Failed to write frame {}.", istep))?;
        summary.written += 1;

        if summary.written % progress_every == 0 {
            progress.set_message(format!("Processed {} frames...", summary.written));
        }
    }

    Ok(summary)
}


/// Convert the trajectory described by `cfg`, returning how many frames were written.
pub fn run(cfg: &ConvertConfig) -> Result<ConvertSummary> {
    let range = cfg.frame_range()?;
    let source = H5Trajectory::open(cfg.get_input(), cfg.get_group())?;
    let nframes = source.count_frames();
    let resolved = range.resolve(nframes)?;

    info!("Found {} frames of {} particles in {:?}.", nframes, source.get_natoms(), source.get_fname());
    info!("Converting frames {} to {} every {} steps ...", resolved.start, resolved.end, range.every);

    let file = File::create(cfg.get_output())
        .with_context(|| format!("Failed to create output file {:?}.", cfg.get_output()))?;
    let mut out = BufWriter::new(file);

    let progress = spinner()?;
    let summary = convert_frames(&source, &mut out, &range, cfg.get_progress_every(), &progress);
    progress.finish_and_clear();
    let summary = summary?;

    out.flush()
        .with_context(|| format!("Failed to flush output file {:?}.", cfg.get_output()))?;

    if summary.skipped > 0 {
        info!("{} requested frame(s) lie beyond the {} stored frames and were skipped.", summary.skipped, nframes);
    }
    info!("Done! Extracted {} frames to {:?}", summary.written, cfg.get_output());

    Ok(summary)
}
