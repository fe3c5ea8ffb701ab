use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::composite::compositor::Compositor;
use crate::foundation::core::{PlacementRect, ScaleFactor, Size};
use crate::foundation::error::{StampError, StampResult};
use crate::normalize::orientation::normalize_with;
use crate::raster::photo::Photo;
use crate::session::throttle::Throttle;

/// Default minimum spacing between preview renders while the scale is being dragged.
pub const DEFAULT_PREVIEW_THROTTLE: Duration = Duration::from_millis(200);

/// Session tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOpts {
    /// Minimum spacing between preview requests.
    pub preview_throttle: Duration,
    /// Scale used until the caller changes it.
    pub initial_scale: ScaleFactor,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            preview_throttle: DEFAULT_PREVIEW_THROTTLE,
            initial_scale: ScaleFactor::default(),
        }
    }
}

/// Monotonic id of a preview render. Only the newest ticket's result is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket(u64);

/// A self-contained composite job. `Send`, so it can run on any worker thread.
#[derive(Clone, Debug)]
pub struct RenderRequest {
    ticket: RenderTicket,
    base: Photo,
    scale: ScaleFactor,
    compositor: Arc<Compositor>,
}

impl RenderRequest {
    /// Ticket to match the outcome against.
    pub fn ticket(&self) -> RenderTicket {
        self.ticket
    }

    /// Scale this request renders at.
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Composite on the calling thread.
    pub fn run(self) -> RenderOutcome {
        let result = self.compositor.composite_normalized(&self.base, self.scale);
        RenderOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

/// Result of a [`RenderRequest`], handed back to [`StampSession::accept`].
#[derive(Debug)]
pub struct RenderOutcome {
    /// Ticket of the request that produced this outcome.
    pub ticket: RenderTicket,
    /// The composited preview, or why it failed.
    pub result: StampResult<Photo>,
}

/// Caller-side state for one photo being watermarked interactively.
///
/// The photo is normalized once when set; every preview then re-composites the upright copy.
/// Preview requests are throttled and tagged with tickets so that results arriving out of order
/// from background workers are dropped unless they belong to the newest request.
#[derive(Debug)]
pub struct StampSession {
    compositor: Arc<Compositor>,
    base: Option<Photo>,
    scale: ScaleFactor,
    dirty: bool,
    throttle: Throttle,
    next_ticket: u64,
    latest: Option<RenderTicket>,
    preview: Option<Photo>,
}

impl StampSession {
    /// Empty session without a photo.
    pub fn new(compositor: Arc<Compositor>, opts: SessionOpts) -> Self {
        Self {
            compositor,
            base: None,
            scale: opts.initial_scale,
            dirty: false,
            throttle: Throttle::new(opts.preview_throttle),
            next_ticket: 0,
            latest: None,
            preview: None,
        }
    }

    /// Shared compositor.
    pub fn compositor(&self) -> &Arc<Compositor> {
        &self.compositor
    }

    /// Replace the working photo. In-flight previews for the old photo become stale.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn set_photo(&mut self, photo: &Photo) -> StampResult<()> {
        if photo.is_empty() {
            return Err(StampError::invalid_input(format!(
                "cannot watermark empty photo {}x{}",
                photo.width(),
                photo.height()
            )));
        }
        let upright = normalize_with(photo, &self.compositor.opts().allocator)?;
        self.base = Some(upright);
        self.preview = None;
        self.latest = None;
        self.dirty = true;
        self.throttle.reset();
        Ok(())
    }

    /// Drop the photo and any preview. Pending results become stale.
    pub fn clear_photo(&mut self) {
        self.base = None;
        self.preview = None;
        self.latest = None;
        self.dirty = false;
    }

    /// The upright working photo.
    pub fn photo(&self) -> Option<&Photo> {
        self.base.as_ref()
    }

    /// Current scale factor.
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Change the scale. Marks the preview dirty when a photo is set.
    pub fn set_scale(&mut self, scale: ScaleFactor) {
        if scale != self.scale {
            self.scale = scale;
            self.dirty = self.base.is_some();
        }
    }

    /// Whether the current preview is out of date.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Issue a preview render if something changed and the throttle allows it.
    ///
    /// Callers poll this on input events and timer ticks; a change dropped by the throttle stays
    /// pending and is emitted by a later poll.
    pub fn preview_request(&mut self, now: Instant) -> Option<RenderRequest> {
        if !self.dirty {
            return None;
        }
        let base = self.base.clone()?;
        if !self.throttle.ready(now) {
            return None;
        }
        self.dirty = false;

        let ticket = RenderTicket(self.next_ticket);
        self.next_ticket += 1;
        self.latest = Some(ticket);
        tracing::trace!(?ticket, scale = self.scale.get(), "preview requested");
        Some(RenderRequest {
            ticket,
            base,
            scale: self.scale,
            compositor: Arc::clone(&self.compositor),
        })
    }

    /// Take a finished preview. Stale outcomes are discarded and yield `Ok(None)`.
    pub fn accept(&mut self, outcome: RenderOutcome) -> StampResult<Option<&Photo>> {
        if self.latest != Some(outcome.ticket) {
            tracing::debug!(ticket = ?outcome.ticket, "stale preview discarded");
            return Ok(None);
        }
        let photo = outcome.result?;
        self.preview = Some(photo);
        Ok(self.preview.as_ref())
    }

    /// Most recently accepted preview.
    pub fn preview(&self) -> Option<&Photo> {
        self.preview.as_ref()
    }

    /// Preview overlay rect for a view of `container` size, in view coordinates.
    pub fn preview_rect(&self, container: Size) -> Option<PlacementRect> {
        let base = self.base.as_ref()?;
        Some(self.compositor.preview_rect(container, base.logical_size(), self.scale))
    }

    /// Composite at the current scale, bypassing throttle and tickets. Used for saving.
    pub fn render_final(&self) -> StampResult<Photo> {
        let base = self
            .base
            .as_ref()
            .ok_or_else(|| StampError::invalid_input("no photo selected"))?;
        self.compositor.composite_normalized(base, self.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/stamp_session.rs"]
mod tests;
