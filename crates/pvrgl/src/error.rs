use crate::attrib::ElementType;
use crate::client::Channel;
use easyerr::Error;

pub const GL_NO_ERROR: u32 = 0;
pub const GL_INVALID_ENUM: u32 = 0x0500;
pub const GL_INVALID_VALUE: u32 = 0x0501;

/// The kind of value a rejected argument was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// An enumerant (capability, type, mode or texture unit).
    Enum,
    /// A numeric value out of range, such as a component count.
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GlError {
    #[error("{call}: invalid {kind:?} argument 0x{value:X}")]
    InvalidArgument {
        call: &'static str,
        kind: Argument,
        value: u32,
    },
    #[error("{ty:?} is not a supported encoding for {channel:?}")]
    UnsupportedFormat { channel: Channel, ty: ElementType },
}

impl GlError {
    #[inline(always)]
    pub fn invalid_enum(call: &'static str, value: u32) -> Self {
        Self::InvalidArgument {
            call,
            kind: Argument::Enum,
            value,
        }
    }

    #[inline(always)]
    pub fn invalid_value(call: &'static str, value: u32) -> Self {
        Self::InvalidArgument {
            call,
            kind: Argument::Value,
            value,
        }
    }

    /// The GL error code this error is reported as.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidArgument {
                kind: Argument::Enum,
                ..
            } => GL_INVALID_ENUM,
            Self::InvalidArgument {
                kind: Argument::Value,
                ..
            } => GL_INVALID_VALUE,
            Self::UnsupportedFormat { .. } => GL_INVALID_ENUM,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(GlError::invalid_enum("glEnableClientState", 1).code(), GL_INVALID_ENUM);
        assert_eq!(GlError::invalid_value("glVertexPointer", 5).code(), GL_INVALID_VALUE);

        let err = GlError::UnsupportedFormat {
            channel: Channel::Color,
            ty: ElementType::Short,
        };
        assert_eq!(err.code(), GL_INVALID_ENUM);
        assert_eq!(err.to_string(), "Short is not a supported encoding for Color");
    }
}
