//! Image carousel for a resolved look.

use roomset_core::DesignLookImage;

/// Circular navigation over a look's images in display order.
#[derive(Debug, Clone, Default)]
pub struct ImageCarousel {
    images: Vec<DesignLookImage>,
    position: usize,
}

impl ImageCarousel {
    /// Builds a carousel positioned on the first image. Images are sorted by
    /// `order`; ties keep their input order.
    #[must_use]
    pub fn new(mut images: Vec<DesignLookImage>) -> Self {
        images.sort_by_key(|image| image.order);
        Self {
            images,
            position: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current(&self) -> Option<&DesignLookImage> {
        self.images.get(self.position)
    }

    /// Moves forward, wrapping from the last image to the first.
    pub fn show_next(&mut self) -> Option<&DesignLookImage> {
        if !self.images.is_empty() {
            self.position = (self.position + 1) % self.images.len();
        }
        self.current()
    }

    /// Moves back, wrapping from the first image to the last.
    pub fn show_previous(&mut self) -> Option<&DesignLookImage> {
        if !self.images.is_empty() {
            self.position = self
                .position
                .checked_sub(1)
                .unwrap_or(self.images.len() - 1);
        }
        self.current()
    }

    /// Jumps to `index`. Out-of-range indexes leave the position unchanged.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.position = index;
            true
        } else {
            false
        }
    }

    pub fn images(&self) -> &[DesignLookImage] {
        &self.images
    }
}
