// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

#[tokio::main]
async fn main() {
    let code = gastown_cli::run(std::env::args()).await;
    std::process::exit(code);
}
