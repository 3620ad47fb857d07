//! Byte buffers, checked numeric values and length-prefixed binary framing.
//!
//! This crate is structured around two key traits: [`Encode`](encode::Encode) and
//! [`Decode`](decode::Decode). Every wire type in this library
//! ([`ByteBuffer`](buffer::ByteBuffer), [`Number`](number::Number), strings and the
//! fixed-width primitives) implements both, and the [`frame`] module composes them
//! into length-prefixed messages that can be read back sequentially.
//!
//! The byte order used for every multi-byte field is never global state. It is carried
//! by a [`ByteOrder`](order::ByteOrder) argument, or by a [`Codec`](order::Codec) that
//! remembers it for you.
//!
//! ```
//! use byteframe::{Codec, Number};
//!
//! let codec = Codec::default();
//! let framed = codec.encode_object(&Number::from(1.0)).unwrap();
//! assert_eq!(framed.len(), 4 + 14);
//!
//! let mut decoded = Number::default();
//! assert_eq!(codec.decode_object(&mut decoded, &framed).unwrap(), 18);
//! assert_eq!(decoded, 1.0);
//! ```

pub mod buffer;
pub mod crc;
pub mod decode;
pub mod encode;
pub mod frame;
pub mod hexfmt;
pub mod number;
pub mod order;
pub mod primitive;
pub mod string;

pub use buffer::{ByteBuffer, HexFormat};
pub use decode::{Decode, DecodeError, DecodeErrorKind};
pub use encode::{Encode, EncodeError};
pub use frame::{Framed, MessageReader, MessageWriter};
pub use number::{Number, PrecisionLossError};
pub use order::{ByteOrder, Codec, ParseByteOrderError};
pub use primitive::{Primitive, PrimitiveKind};
