// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// For a given error enum `{Name}` generate a struct `Located{Name}` that
/// carries the [`crate::Span`] (the error location in the input stream) along
/// the error. Additionally, generates the `nom` error traits and [`From`]
/// conversions for external errors and other located errors.
///
/// ```rust
/// use attrgauze_parse_utils::{located_error, LocatedParsingError, Span};
/// use nom::error::{ErrorKind, ParseError};
///
/// #[derive(PartialEq, Eq, Clone, Debug)]
/// pub struct UndefinedSegmentType(pub u8);
///
/// #[derive(PartialEq, Eq, Clone, Debug)]
/// pub enum SegmentParsingError {
///     NomError(ErrorKind),
///     UndefinedSegmentType(UndefinedSegmentType),
/// }
///
/// located_error! {
///     LocatedSegmentParsingError(SegmentParsingError) {
///         nom => NomError,
///         external => [UndefinedSegmentType(UndefinedSegmentType)],
///     }
/// }
///
/// let err = LocatedSegmentParsingError::from_error_kind(Span::new(&[1, 2]), ErrorKind::Eof);
/// assert_eq!(err.error(), &SegmentParsingError::NomError(ErrorKind::Eof));
/// ```
#[macro_export]
macro_rules! located_error {
    (
        $(#[$meta:meta])*
        $located:ident($error:ident) {
            nom => $nom_variant:ident
            $(, external => [$($ext_variant:ident($ext_ty:ty)),* $(,)?])?
            $(, located => [$($loc_variant:ident($loc_ty:ident)),* $(,)?])?
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Clone, Debug)]
        pub struct $located<'a> {
            span: $crate::Span<'a>,
            error: $error,
        }

        impl<'a> $located<'a> {
            pub const fn new(span: $crate::Span<'a>, error: $error) -> Self {
                Self { span, error }
            }
        }

        impl<'a> From<$located<'a>> for ($crate::Span<'a>, $error) {
            fn from(input: $located<'a>) -> Self {
                (input.span, input.error)
            }
        }

        impl<'a> $crate::LocatedParsingError for $located<'a> {
            type Span = $crate::Span<'a>;
            type Error = $error;

            fn span(&self) -> &Self::Span {
                &self.span
            }

            fn error(&self) -> &Self::Error {
                &self.error
            }
        }

        impl<'a> $crate::nom::error::FromExternalError<$crate::Span<'a>, $error> for $located<'a> {
            fn from_external_error(
                input: $crate::Span<'a>,
                _kind: $crate::nom::error::ErrorKind,
                error: $error,
            ) -> Self {
                $located::new(input, error)
            }
        }

        impl<'a> $crate::nom::error::ParseError<$crate::Span<'a>> for $located<'a> {
            fn from_error_kind(
                input: $crate::Span<'a>,
                kind: $crate::nom::error::ErrorKind,
            ) -> Self {
                $located::new(input, $error::$nom_variant(kind))
            }

            fn append(
                _input: $crate::Span<'a>,
                _kind: $crate::nom::error::ErrorKind,
                other: Self,
            ) -> Self {
                other
            }
        }

        $($(
            impl<'a> $crate::nom::error::FromExternalError<$crate::Span<'a>, $ext_ty> for $located<'a> {
                fn from_external_error(
                    input: $crate::Span<'a>,
                    _kind: $crate::nom::error::ErrorKind,
                    error: $ext_ty,
                ) -> Self {
                    $located::new(input, $error::$ext_variant(error))
                }
            }
        )*)?

        $($(
            impl<'a> From<$loc_ty<'a>> for $located<'a> {
                fn from(input: $loc_ty<'a>) -> Self {
                    let (span, error) = input.into();
                    $located::new(span, $error::$loc_variant(error))
                }
            }
        )*)?
    };
}

#[cfg(test)]
mod tests {
    use crate::{LocatedParsingError, Span};
    use nom::{
        error::{ErrorKind, FromExternalError, ParseError},
        Slice,
    };

    #[derive(PartialEq, Eq, Clone, Debug)]
    pub struct UndefinedCode(u8);

    #[derive(PartialEq, Eq, Clone, Debug)]
    pub enum InnerError {
        NomError(ErrorKind),
    }

    #[derive(PartialEq, Eq, Clone, Debug)]
    pub enum OuterError {
        NomError(ErrorKind),
        UndefinedCode(UndefinedCode),
        Inner(InnerError),
    }

    located_error! {
        LocatedInnerError(InnerError) {
            nom => NomError,
        }
    }

    located_error! {
        LocatedOuterError(OuterError) {
            nom => NomError,
            external => [UndefinedCode(UndefinedCode)],
            located => [Inner(LocatedInnerError)],
        }
    }

    #[test]
    fn test_from_error_kind() {
        let buf = Span::new(&[0x01, 0x02, 0x03]);
        let err = LocatedOuterError::from_error_kind(buf.slice(2..), ErrorKind::Eof);
        assert_eq!(err.span().location_offset(), 2);
        assert_eq!(err.error(), &OuterError::NomError(ErrorKind::Eof));
    }

    #[test]
    fn test_from_external() {
        let buf = Span::new(&[0xff]);
        let err = LocatedOuterError::from_external_error(buf, ErrorKind::MapRes, UndefinedCode(1));
        assert_eq!(err.error(), &OuterError::UndefinedCode(UndefinedCode(1)));
    }

    #[test]
    fn test_from_located() {
        let buf = Span::new(&[0x00, 0x01]);
        let inner = LocatedInnerError::new(buf.slice(1..), InnerError::NomError(ErrorKind::Eof));
        let outer: LocatedOuterError<'_> = inner.into();
        assert_eq!(outer.span().location_offset(), 1);
        assert_eq!(
            outer.error(),
            &OuterError::Inner(InnerError::NomError(ErrorKind::Eof))
        );
    }
}
