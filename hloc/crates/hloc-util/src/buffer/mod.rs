//! Buffer module - shared source text and positions into it.
//!
//! A [`SourceBuffer`] is one immutable text buffer shared by reference
//! counting. A [`BufferPos`] is an offset into one specific buffer; two
//! positions can only be compared, subtracted or sliced together when they
//! reference the same buffer.
//!
//! # Examples
//!
//! ```
//! use hloc_util::buffer::SourceBuffer;
//!
//! let buf = SourceBuffer::new("ENTRY %e");
//! let start = buf.begin();
//! let name = start.add(6);
//! assert_eq!(name.distance(&start), Ok(6));
//! assert_eq!(name.byte(), Ok(b'%'));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{BufferError, BufferResult};

/// An immutable, shared text buffer.
///
/// Cloning a `SourceBuffer` is cheap and yields a handle to the same
/// buffer; identity is the identity of the shared allocation.
///
/// # Examples
///
/// ```
/// use hloc_util::buffer::SourceBuffer;
///
/// let a = SourceBuffer::new("x");
/// let b = a.clone();
/// let c = SourceBuffer::new("x");
/// assert!(a.same_buffer(&b));
/// assert!(!a.same_buffer(&c));
/// ```
#[derive(Clone)]
pub struct SourceBuffer {
    text: Arc<str>,
}

impl SourceBuffer {
    /// Create a new buffer owning a copy of `text`.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// Get the full buffer text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Get the full buffer as bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length of the buffer in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the buffer holds no text
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns true if both handles reference the same buffer
    #[inline]
    pub fn same_buffer(&self, other: &SourceBuffer) -> bool {
        Arc::ptr_eq(&self.text, &other.text)
    }

    /// Position of the first byte
    ///
    /// # Examples
    ///
    /// ```
    /// use hloc_util::buffer::SourceBuffer;
    ///
    /// let buf = SourceBuffer::new("abc");
    /// assert_eq!(buf.begin().offset(), 0);
    /// ```
    pub fn begin(&self) -> BufferPos {
        BufferPos::new(self, 0)
    }

    /// One-past-the-end position
    ///
    /// # Examples
    ///
    /// ```
    /// use hloc_util::buffer::SourceBuffer;
    ///
    /// let buf = SourceBuffer::new("abc");
    /// assert_eq!(buf.end().offset(), 3);
    /// assert!(!buf.end().can_deref());
    /// ```
    pub fn end(&self) -> BufferPos {
        BufferPos::new(self, self.len())
    }

    /// Position at an arbitrary offset
    pub fn pos(&self, offset: usize) -> BufferPos {
        BufferPos::new(self, offset)
    }
}

impl fmt::Debug for SourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceBuffer")
            .field("len", &self.len())
            .finish()
    }
}

impl From<&str> for SourceBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SourceBuffer {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A position inside one [`SourceBuffer`].
///
/// A position may carry a logical end bound, in which case it describes the
/// span `offset..end` (see [`BufferPos::to`]). Without a bound it describes
/// the rest of the buffer.
///
/// Positions of different buffers are never equal and have no ordering;
/// [`BufferPos::try_cmp`] and [`BufferPos::distance`] report
/// [`BufferError::CrossBuffer`] for them.
#[derive(Clone)]
pub struct BufferPos {
    buf: SourceBuffer,
    offset: usize,
    end: Option<usize>,
}

impl BufferPos {
    /// Create a position at `offset` in `buf`
    pub fn new(buf: &SourceBuffer, offset: usize) -> Self {
        Self {
            buf: buf.clone(),
            offset,
            end: None,
        }
    }

    /// Byte offset from the buffer start
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Logical end bound, if this position describes a span
    #[inline]
    pub fn end_bound(&self) -> Option<usize> {
        self.end
    }

    /// The referenced buffer
    #[inline]
    pub fn buffer(&self) -> &SourceBuffer {
        &self.buf
    }

    /// Returns true if both positions reference the same buffer
    #[inline]
    pub fn same_buffer(&self, other: &BufferPos) -> bool {
        self.buf.same_buffer(&other.buf)
    }

    /// Start sentinel of the referenced buffer
    pub fn begin(&self) -> BufferPos {
        self.buf.begin()
    }

    /// One-past-the-end sentinel of the referenced buffer
    pub fn end(&self) -> BufferPos {
        self.buf.end()
    }

    /// Returns a position `delta` bytes further on.
    ///
    /// The result is not checked against the buffer length; dereferencing
    /// it past the end fails instead.
    pub fn add(&self, delta: usize) -> BufferPos {
        BufferPos {
            buf: self.buf.clone(),
            offset: self.offset + delta,
            end: self.end,
        }
    }

    /// Returns a position `delta` bytes earlier.
    ///
    /// # Examples
    ///
    /// ```
    /// use hloc_util::buffer::SourceBuffer;
    /// use hloc_util::error::BufferError;
    ///
    /// let buf = SourceBuffer::new("abc");
    /// assert_eq!(buf.end().sub(1).unwrap().offset(), 2);
    /// assert_eq!(
    ///     buf.begin().sub(1).unwrap_err(),
    ///     BufferError::Underflow { offset: 0, delta: 1 }
    /// );
    /// ```
    pub fn sub(&self, delta: usize) -> BufferResult<BufferPos> {
        let offset = self
            .offset
            .checked_sub(delta)
            .ok_or(BufferError::Underflow {
                offset: self.offset,
                delta,
            })?;
        Ok(BufferPos {
            buf: self.buf.clone(),
            offset,
            end: self.end,
        })
    }

    /// Moves this position forward in place
    #[inline]
    pub fn advance(&mut self, delta: usize) {
        self.offset += delta;
    }

    /// Moves this position to `offset` in place
    #[inline]
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Signed distance `self - other`.
    pub fn distance(&self, other: &BufferPos) -> BufferResult<isize> {
        if !self.same_buffer(other) {
            return Err(BufferError::CrossBuffer);
        }
        Ok(self.offset as isize - other.offset as isize)
    }

    /// Compares two positions of the same buffer.
    pub fn try_cmp(&self, other: &BufferPos) -> BufferResult<Ordering> {
        if !self.same_buffer(other) {
            return Err(BufferError::CrossBuffer);
        }
        Ok(self.offset.cmp(&other.offset))
    }

    /// Returns true if the position points at a byte of its buffer
    #[inline]
    pub fn can_deref(&self) -> bool {
        self.offset < self.buf.len()
    }

    /// Returns true if the position is at or beyond the end of its buffer
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.buf.len()
    }

    /// The byte at this position.
    ///
    /// # Examples
    ///
    /// ```
    /// use hloc_util::buffer::SourceBuffer;
    ///
    /// let buf = SourceBuffer::new("ab");
    /// assert_eq!(buf.pos(1).byte(), Ok(b'b'));
    /// assert!(buf.pos(2).byte().is_err());
    /// ```
    pub fn byte(&self) -> BufferResult<u8> {
        self.buf
            .as_bytes()
            .get(self.offset)
            .copied()
            .ok_or(BufferError::OutOfRange {
                offset: self.offset,
                len: self.buf.len(),
            })
    }

    /// Bounded view from this position up to `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hloc_util::buffer::SourceBuffer;
    ///
    /// let buf = SourceBuffer::new("copy(%p)");
    /// let view = buf.begin().to(&buf.pos(4)).unwrap();
    /// assert_eq!(view.as_str(), Ok("copy"));
    /// ```
    pub fn to(&self, end: &BufferPos) -> BufferResult<BufferPos> {
        if !self.same_buffer(end) {
            return Err(BufferError::CrossBuffer);
        }
        if end.offset < self.offset {
            return Err(BufferError::InvertedSpan {
                start: self.offset,
                end: end.offset,
            });
        }
        Ok(BufferPos {
            buf: self.buf.clone(),
            offset: self.offset,
            end: Some(end.offset),
        })
    }

    /// Text described by this position: the bounded span, or the rest of
    /// the buffer when no bound is set.
    pub fn as_str(&self) -> BufferResult<&str> {
        let len = self.buf.len();
        let end = self.end.unwrap_or(len);
        if self.offset > len || end > len {
            return Err(BufferError::OutOfRange {
                offset: self.offset.max(end),
                len,
            });
        }
        if end < self.offset {
            return Err(BufferError::InvertedSpan {
                start: self.offset,
                end,
            });
        }
        self.buf
            .as_str()
            .get(self.offset..end)
            .ok_or(BufferError::NotCharBoundary {
                start: self.offset,
                end,
            })
    }

    /// Drops the end bound
    pub fn unbounded(&self) -> BufferPos {
        BufferPos {
            buf: self.buf.clone(),
            offset: self.offset,
            end: None,
        }
    }
}

impl PartialEq for BufferPos {
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(other) && self.offset == other.offset
    }
}

impl PartialOrd for BufferPos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl fmt::Debug for BufferPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPos")
            .field("offset", &self.offset)
            .field("end", &self.end)
            .finish()
    }
}

impl fmt::Display for BufferPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(""))
    }
}
