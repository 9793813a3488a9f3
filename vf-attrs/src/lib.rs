mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for unit structs and structs with named fields.
///
/// The information of the error is customized using the `error` attribute, by adding the
/// corresponding tags to it:
/// ```ignore
/// use vf_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "unbalanced parentheses",
///     labels = ["this parenthesis is not closed"],
///     help = "add a closing parenthesis `)` somewhere after this",
/// )]
/// pub struct UnbalancedParentheses;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                  |
/// | --------- | ---------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error when it is displayed.          |
/// | `labels`  | An array of label texts, one per span of the error, in the same order.       |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it. |
/// | `note`    | Optional note with additional context.                                       |
///
/// Each tag accepts an expression that evaluates to something implementing
/// [`ToString`]. The expressions are evaluated inside `build_report`, so fields are reachable
/// through `self` (e.g. `format!("found `{}`", self.character)`).
///
/// [`ErrorKind`]: ../vf_error/trait.ErrorKind.html
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ::vf_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            #target
        }
    }.into()
}
