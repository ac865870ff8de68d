#![doc = include_str!("../README.md")]

use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers in front of `fn`.
    struct Preamble {
        tokens: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // generics, parameters, return type and where clause.
    struct Header {
        tokens: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        preamble: Preamble,
        _fn: KFn,
        name: Ident,
        header: Header,
        block: BraceGroup,
    }
}

impl quote::ToTokens for Preamble {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.tokens.to_tokens(tokens)
    }
}

impl quote::ToTokens for Header {
    fn to_tokens(&self, tokens: &mut unsynn::TokenStream) {
        self.tokens.to_tokens(tokens)
    }
}

/// Runs `reflector_testhelpers::setup()` before the test body, so events from
/// `reflector` show up in the test output, filtered by `REFLECTOR_LOG`.
///
/// ```ignore
/// use reflector_testhelpers::{IPanic, test};
///
/// #[test]
/// fn put_then_get() -> Result<(), IPanic> {
///     Ok(())
/// }
/// ```
///
/// Without arguments the function is marked `#[test]`. An argument replaces
/// that marker, e.g. `#[reflector_testhelpers::test(wasm_bindgen_test)]`.
#[proc_macro_attribute]
pub fn test(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let test_fn = match item.to_token_iter().parse::<TestFn>() {
        Ok(test_fn) => test_fn,
        Err(err) => {
            let msg = format!("#[reflector_testhelpers::test] expects a function: {err}");
            return quote::quote! { ::core::compile_error!(#msg); }.into();
        }
    };

    let TestFn {
        preamble,
        name,
        header,
        block,
        ..
    } = test_fn;
    let body = block.0.stream();

    let marker = if attr.is_empty() {
        quote::quote! { #[::core::prelude::rust_2024::test] }
    } else {
        let attr = TokenStream::from(attr);
        quote::quote! { #[#attr] }
    };

    quote::quote! {
        #marker
        #preamble fn #name #header {
            ::reflector_testhelpers::setup();
            #body
        }
    }
    .into()
}
