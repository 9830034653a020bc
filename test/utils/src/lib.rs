pub fn transaction_preview_fixture() -> &'static str {
    return r#"Transaction Preview:
- Action: transfer
- Amount: 5 FLR
- To: 0x742d35Cc6634C0532925a3b844Bc454e4438f44e

Type CONFIRM to proceed."#;
}

pub fn markdown_fixture() -> &'static str {
    return r#"Here is what I found:

- **FLR** is the native token of the Flare network.
- Wrapped FLR is called `WFLR`.

Anything else?"#;
}

pub fn long_line_fixture() -> &'static str {
    return "This is a really long reply that pushes well past the width of a chat bubble, so it has to be wrapped across a handful of lines before it can be displayed.";
}
