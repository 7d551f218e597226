//! Pass-through sources for in-memory buffers

use std::io::Cursor;

use crate::config::Config;
use crate::error::Result;
use crate::resource::Resource;

/// Higher-order source wrapping a buffer constructor.
///
/// Whatever arguments the constructor needs are captured by the closure,
/// so any buffer type can be provided without the crate knowing its shape.
/// Each acquisition runs the constructor again and hands back a fresh,
/// independent value; buffer sources have no cache identity, so acquiring
/// one through a session behaves exactly like acquiring it directly. No
/// filesystem interaction, no cleanup beyond normal drop.
pub struct Buffer<F> {
    ctor: F,
}

impl<F> Buffer<F> {
    /// Wrap a constructor closure as an acquirable source.
    pub fn new(ctor: F) -> Self {
        Self { ctor }
    }
}

impl<T, F> Resource for Buffer<F>
where
    F: Fn() -> T,
    T: Send + 'static,
{
    type Handle = T;

    fn create(&self, _config: &Config) -> Result<T> {
        Ok((self.ctor)())
    }
}

impl<F> std::fmt::Debug for Buffer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer").finish_non_exhaustive()
    }
}

/// Binary-mode buffer source seeded with `initial`.
///
/// The handle is a [`Cursor`] over owned bytes, positioned at the start,
/// supporting `Read`, `Write`, and `Seek`.
pub fn bytes(initial: impl Into<Vec<u8>>) -> Buffer<impl Fn() -> Cursor<Vec<u8>>> {
    let initial = initial.into();
    Buffer::new(move || Cursor::new(initial.clone()))
}

/// Text-mode buffer source seeded with `initial`.
///
/// The handle is a plain `String`; write through `std::fmt::Write` or
/// `push_str`.
pub fn text(initial: impl Into<String>) -> Buffer<impl Fn() -> String> {
    let initial = initial.into();
    Buffer::new(move || initial.clone())
}
