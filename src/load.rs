//! Asynchronous image acquisition with latest-request-wins semantics.
//!
//! Loading is split in three steps so no borrow of the slot is held while
//! the engine works:
//!
//! 1. [`ImageSlot::request`] records the new source and hands out a
//!    [`LoadRequest`] tagged with a fresh [`LoadTicket`].
//! 2. [`LoadRequest::run`] awaits the engine's [`ImageLoader`].
//! 3. [`ImageSlot::complete`] installs the result, but only if its ticket is
//!    still the latest one issued. Completions of superseded requests are
//!    dropped, so a slow old load can never overwrite a newer image.
//!
//! ```
//! use core::future::{Future, ready};
//! use imagefit::{Completion, Dimension, Image, ImageLoader, ImageSlot, Matrix, ResizeMode, TileMode};
//!
//! struct Bitmap(f32, f32);
//!
//! impl Image for Bitmap {
//!     type Shader = Matrix;
//!     fn width(&self) -> f32 { self.0 }
//!     fn height(&self) -> f32 { self.1 }
//!     fn make_shader(&self, _: TileMode, _: TileMode, m: &Matrix) -> Matrix { *m }
//! }
//!
//! struct Loader;
//!
//! impl ImageLoader for Loader {
//!     type Source = &'static str;
//!     type Image = Bitmap;
//!     type Error = ();
//!     fn load(&self, _: &&'static str) -> impl Future<Output = Result<Bitmap, ()>> {
//!         ready(Ok(Bitmap(100.0, 200.0)))
//!     }
//! }
//!
//! # fn block_on<F: Future>(f: F) -> F::Output {
//! #     let mut f = core::pin::pin!(f);
//! #     let mut cx = core::task::Context::from_waker(core::task::Waker::noop());
//! #     loop {
//! #         if let core::task::Poll::Ready(v) = f.as_mut().poll(&mut cx) { return v; }
//! #     }
//! # }
//! let mut slot: ImageSlot<&str, Bitmap> = ImageSlot::new();
//! let container = Dimension::new(300.0, 300.0);
//!
//! let request = slot.request("photo.jpg").unwrap();
//! assert!(slot.shader(container, ResizeMode::Cover).is_none());
//!
//! let loaded = block_on(request.run(&Loader));
//! assert_eq!(slot.complete(loaded), Ok(Completion::Applied));
//!
//! let shader = slot.shader(container, ResizeMode::Cover).unwrap();
//! assert_eq!(shader.trans_y, -150.0);
//! ```

use core::fmt;
use core::future::Future;

use crate::fit::ResizeMode;
use crate::geometry::Dimension;
use crate::shader::{Image, build_shader};

/// Engine-side asynchronous image loader.
pub trait ImageLoader {
    /// Descriptor the engine resolves into an image (URI, asset id, ...).
    type Source;
    /// Image handle produced on success.
    type Image: Image;
    /// Load failure. Passed through to the caller untouched.
    type Error;

    fn load(
        &self,
        source: &Self::Source,
    ) -> impl Future<Output = Result<Self::Image, Self::Error>>;
}

/// Identifier of one load request. Later requests carry larger tickets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A pending load, issued by [`ImageSlot::request`].
#[derive(Clone, Debug)]
#[must_use = "a load request does nothing until it is run and completed"]
pub struct LoadRequest<S> {
    ticket: LoadTicket,
    source: S,
}

impl<S> LoadRequest<S> {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the load on `loader`. Feed the output to [`ImageSlot::complete`].
    pub async fn run<L>(self, loader: &L) -> Loaded<L::Image, L::Error>
    where
        L: ImageLoader<Source = S>,
    {
        let result = loader.load(&self.source).await;
        Loaded {
            ticket: self.ticket,
            result,
        }
    }

    /// Pair an externally obtained result with this request's ticket, for
    /// engines that report completion through callbacks.
    pub fn finish<I, E>(self, result: Result<I, E>) -> Loaded<I, E> {
        Loaded {
            ticket: self.ticket,
            result,
        }
    }
}

/// Outcome of a load, still tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct Loaded<I, E> {
    ticket: LoadTicket,
    result: Result<I, E>,
}

impl<I, E> Loaded<I, E> {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }
}

/// What [`ImageSlot::complete`] did with a successful or stale load.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The image is now the slot's current image.
    Applied,
    /// A newer request was issued since; the result was discarded.
    Stale,
}

/// Holder of the most recently requested source and its loaded image.
///
/// Single writer (completion) and single reader (shader building), with no
/// interior mutability. Changing the source drops the previous image: the
/// slot only ever exposes an image for the source it currently holds.
#[derive(Clone, Debug)]
pub struct ImageSlot<S, I> {
    source: Option<S>,
    issued: u64,
    pending: Option<LoadTicket>,
    image: Option<I>,
}

impl<S, I> Default for ImageSlot<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, I> ImageSlot<S, I> {
    pub const fn new() -> Self {
        Self {
            source: None,
            issued: 0,
            pending: None,
            image: None,
        }
    }

    /// Currently requested source, if any.
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Loaded image for the current source, or `None` while not ready.
    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    /// Whether a request has been issued and not yet completed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ticket carried by the most recent [`LoadRequest`] handed out, even
    /// if it has since completed or been cleared.
    pub fn latest_ticket(&self) -> Option<LoadTicket> {
        (self.issued > 0).then_some(LoadTicket(self.issued))
    }

    /// Forget the source and image. Outstanding loads become stale.
    pub fn clear(&mut self) {
        self.source = None;
        self.image = None;
        self.pending = None;
    }

    /// Install a finished load if it belongs to the latest request.
    ///
    /// A failure of the latest request is returned as `Err` and leaves the
    /// slot without an image; nothing is retried. A stale completion is
    /// dropped whether it succeeded or failed.
    pub fn complete<E: fmt::Debug>(&mut self, loaded: Loaded<I, E>) -> Result<Completion, E> {
        if self.pending != Some(loaded.ticket) {
            log::debug!(
                "discarding stale image load {} (latest {})",
                loaded.ticket.0,
                self.issued
            );
            return Ok(Completion::Stale);
        }
        self.pending = None;
        match loaded.result {
            Ok(image) => {
                log::debug!("image load {} applied", loaded.ticket.0);
                self.image = Some(image);
                Ok(Completion::Applied)
            }
            Err(e) => {
                log::warn!("image load {} failed: {e:?}", loaded.ticket.0);
                self.image = None;
                Err(e)
            }
        }
    }

    fn issue(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.pending = Some(ticket);
        self.image = None;
        ticket
    }
}

impl<S: PartialEq + Clone, I> ImageSlot<S, I> {
    /// Start loading `source`.
    ///
    /// Returns `None` when `source` is already the current source: the
    /// earlier request (or its loaded image) stands. Otherwise the current
    /// image is dropped and every earlier request becomes stale.
    pub fn request(&mut self, source: S) -> Option<LoadRequest<S>> {
        if self.source.as_ref() == Some(&source) {
            return None;
        }
        self.source = Some(source.clone());
        let ticket = self.issue();
        log::debug!("image load {} requested", ticket.0);
        Some(LoadRequest { ticket, source })
    }

    /// Request the current source again, e.g. after a failed load.
    /// `None` when no source is set.
    pub fn reload(&mut self) -> Option<LoadRequest<S>> {
        let source = self.source.clone()?;
        let ticket = self.issue();
        log::debug!("image load {} requested (reload)", ticket.0);
        Some(LoadRequest { ticket, source })
    }

    /// Image for `source`, if that is the current source and it has loaded.
    pub fn image_for(&self, source: &S) -> Option<&I> {
        if self.source.as_ref() == Some(source) {
            self.image.as_ref()
        } else {
            None
        }
    }
}

impl<S, I: Image> ImageSlot<S, I> {
    /// Shader for the current image fitted into `container`, or `None`
    /// while no image is loaded.
    pub fn shader(&self, container: Dimension, mode: ResizeMode) -> Option<I::Shader> {
        build_shader(self.image.as_ref(), container, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matrix, TileMode};

    struct Px(f32);

    impl Image for Px {
        type Shader = ();

        fn width(&self) -> f32 {
            self.0
        }

        fn height(&self) -> f32 {
            self.0
        }

        fn make_shader(&self, _: TileMode, _: TileMode, _: &Matrix) -> Self::Shader {}
    }

    type Slot = ImageSlot<u32, Px>;

    #[test]
    fn tickets_increase() {
        let mut slot = Slot::new();
        assert_eq!(slot.latest_ticket(), None);
        let a = slot.request(1).unwrap();
        let b = slot.request(2).unwrap();
        assert!(b.ticket() > a.ticket());
        assert_eq!(slot.latest_ticket(), Some(b.ticket()));
    }

    #[test]
    fn same_source_is_not_requested_twice() {
        let mut slot = Slot::new();
        assert!(slot.request(7).is_some());
        assert!(slot.request(7).is_none());
        assert!(slot.is_pending());
    }

    #[test]
    fn stale_success_is_discarded() {
        let mut slot = Slot::new();
        let old = slot.request(1).unwrap();
        let new = slot.request(2).unwrap();

        assert_eq!(slot.complete(old.finish::<_, ()>(Ok(Px(1.0)))), Ok(Completion::Stale));
        assert!(slot.image().is_none());
        assert!(slot.is_pending());

        assert_eq!(slot.complete(new.finish::<_, ()>(Ok(Px(2.0)))), Ok(Completion::Applied));
        assert_eq!(slot.image().map(|p| p.0), Some(2.0));
        assert!(!slot.is_pending());
    }

    #[test]
    fn stale_after_newer_applied() {
        let mut slot = Slot::new();
        let old = slot.request(1).unwrap();
        let new = slot.request(2).unwrap();
        slot.complete(new.finish::<_, ()>(Ok(Px(2.0)))).unwrap();
        assert_eq!(slot.complete(old.finish::<_, ()>(Ok(Px(1.0)))), Ok(Completion::Stale));
        assert_eq!(slot.image().map(|p| p.0), Some(2.0));
    }

    #[test]
    fn stale_failure_is_swallowed() {
        let mut slot = Slot::new();
        let old = slot.request(1).unwrap();
        let _new = slot.request(2).unwrap();
        assert_eq!(slot.complete(old.finish::<Px, _>(Err("gone"))), Ok(Completion::Stale));
    }

    #[test]
    fn current_failure_surfaces() {
        let mut slot = Slot::new();
        let req = slot.request(1).unwrap();
        assert_eq!(slot.complete(req.finish::<Px, _>(Err("404"))), Err("404"));
        assert!(slot.image().is_none());
        assert!(!slot.is_pending());

        let retry = slot.reload().unwrap();
        assert_eq!(retry.source(), &1);
        assert_eq!(slot.complete(retry.finish::<_, ()>(Ok(Px(3.0)))), Ok(Completion::Applied));
    }

    #[test]
    fn double_completion_is_stale() {
        let mut slot = Slot::new();
        let req = slot.request(1).unwrap();
        let again = req.clone();
        slot.complete(req.finish::<_, ()>(Ok(Px(1.0)))).unwrap();
        assert_eq!(slot.complete(again.finish::<_, ()>(Ok(Px(9.0)))), Ok(Completion::Stale));
        assert_eq!(slot.image().map(|p| p.0), Some(1.0));
    }

    #[test]
    fn changing_source_drops_image() {
        let mut slot = Slot::new();
        let req = slot.request(1).unwrap();
        slot.complete(req.finish::<_, ()>(Ok(Px(1.0)))).unwrap();
        assert!(slot.image_for(&1).is_some());

        let _req = slot.request(2).unwrap();
        assert!(slot.image().is_none());
        assert!(slot.image_for(&1).is_none());
    }

    #[test]
    fn clear_makes_outstanding_loads_stale() {
        let mut slot = Slot::new();
        let req = slot.request(1).unwrap();
        slot.clear();
        assert_eq!(slot.latest_ticket(), Some(req.ticket()));
        assert!(!slot.is_pending());
        assert_eq!(slot.complete(req.finish::<_, ()>(Ok(Px(1.0)))), Ok(Completion::Stale));
        assert!(slot.source().is_none());
        assert!(slot.reload().is_none());
    }

    #[test]
    fn request_after_clear_gets_next_ticket() {
        let mut slot = Slot::new();
        let first = slot.request(1).unwrap();
        slot.clear();
        let second = slot.request(1).unwrap();
        assert_eq!(second.ticket().get(), first.ticket().get() + 1);
        assert_eq!(slot.latest_ticket(), Some(second.ticket()));
    }

    #[test]
    fn shader_requires_image() {
        let mut slot = Slot::new();
        let container = Dimension::new(10.0, 10.0);
        assert!(slot.shader(container, ResizeMode::Cover).is_none());
        let req = slot.request(1).unwrap();
        slot.complete(req.finish::<_, ()>(Ok(Px(5.0)))).unwrap();
        assert!(slot.shader(container, ResizeMode::Cover).is_some());
    }
}
