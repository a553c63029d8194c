use anyhow::Result;
use std::io::{self, Write};
use viuer::{print, Config};

use crate::types::Area;

/// Converts a rendered page to the image 0.24 type viuer expects,
/// inverting colours for dark mode.
pub fn to_viuer_image(image: &image::DynamicImage, dark_mode: bool) -> Option<image_0_24::DynamicImage> {
    let mut rgba = image.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());

    if dark_mode {
        for pixel in rgba.pixels_mut() {
            // alpha untouched
            pixel[0] = 255 - pixel[0];
            pixel[1] = 255 - pixel[1];
            pixel[2] = 255 - pixel[2];
        }
    }

    let buffer = image_0_24::ImageBuffer::from_raw(width, height, rgba.into_raw())?;
    Some(image_0_24::DynamicImage::ImageRgba8(buffer))
}

/// Draw a PDF page inside `area`; viuer keeps the aspect ratio and picks
/// kitty, iTerm or half-block output depending on the terminal.
pub fn display_page(image: &image::DynamicImage, area: Area, dark_mode: bool) -> Result<()> {
    if area.is_empty() {
        return Ok(());
    }

    // Save cursor so the rest of the frame is unaffected
    print!("\x1b[s");
    io::stdout().flush()?;

    let config = Config {
        transparent: true,
        absolute_offset: true,
        x: area.x,
        y: area.y as i16,
        restore_cursor: false,
        width: Some(area.width as u32),
        height: Some(area.height as u32),
        truecolor: true,
        use_kitty: true,
        use_iterm: true,
    };

    let converted = to_viuer_image(image, dark_mode)
        .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;
    print(&converted, &config)?;

    print!("\x1b[u");
    io::stdout().flush()?;
    Ok(())
}

/// Remove graphics left by kitty/iTerm; block output goes away with a normal clear.
pub fn clear_graphics() -> Result<()> {
    let term_program = std::env::var("TERM_PROGRAM").unwrap_or_default();

    if std::env::var("KITTY_WINDOW_ID").is_ok() || term_program == "ghostty" {
        print!("\x1b_Ga=d\x1b\\");
    }
    if term_program == "iTerm.app" {
        print!("\x1b]1337;File=inline=0:\x07");
    }
    io::stdout().flush()?;
    Ok(())
}
