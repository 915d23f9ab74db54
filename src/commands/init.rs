//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Blog
author: John Doe

# Directory
posts_dir: posts
about_file: about.md
public_dir: public

# Listing
per_page: 10
preview:
  list_length: 100
  page_length: 250
words_per_minute: 240

# Rendering
highlight:
  theme: base16-ocean.dark
  line_number: false
math:
  enable: true
"#;

const ABOUT: &str = r#"---
id: about
title: About
date: "2024-01-01"
---
Write something about yourself here.
"#;

const HELLO: &str = r#"---
id: hello-world
title: Hello World
date: "2024-01-01"
tags:
  - meta
---
Welcome! This is your first post. Inline math like $e^{i\pi} + 1 = 0$ and
fenced code both work:

```rust
fn main() {
    println!("Hello, world!");
}
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("about.md"), ABOUT)?;
    fs::write(target_dir.join("posts/hello-world.md"), HELLO)?;

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}
