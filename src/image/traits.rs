/// Read access to a row-major single-channel image.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    /// Bounds-checked pixel lookup; `None` outside the image.
    fn sample(&self, x: usize, y: usize) -> Option<Self::Pixel> {
        if x < self.width() && y < self.height() {
            Some(self.row(y)[x])
        } else {
            None
        }
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    /// Apply `f` to every pixel in place.
    fn map_in_place<F>(&mut self, mut f: F)
    where
        F: FnMut(Self::Pixel) -> Self::Pixel,
    {
        for y in 0..self.height() {
            for px in self.row_mut(y) {
                *px = f(*px);
            }
        }
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
