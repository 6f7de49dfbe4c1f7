use log::{info, warn};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use snowfall::{Params, Snowfall, utils::NIGHT};

const WIDTH: u32 = 480;
const HEIGHT: u32 = 320;

fn rgba_to_u32(a: u8, r: u8, g: u8, b: u8) -> u32 {
    // Minifb expects ARGB on most platforms; construct accordingly.
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

fn main() {
    env_logger::init();

    let params = Params::builder(WIDTH, HEIGHT)
        .size(2, 8)
        .speed(1.0, 4.0)
        .angle_max(15.0)
        .fading(true)
        .build()
        .expect("demo parameters are valid");
    let mut snowfall = Snowfall::new(params, 200, 7);

    let mut window = Window::new(
        "snowfall: S stop, R restart, P save PNG, Esc quit",
        WIDTH as usize,
        HEIGHT as usize,
        WindowOptions::default(),
    ).expect("Unable to open window");
    window.set_target_fps(60);

    let mut buffer: Vec<u32> = vec![0; (WIDTH * HEIGHT) as usize];
    let mut frame: u64 = 0;

    while window.is_open() && !window.is_key_down(Key::Escape) {
        if window.is_key_down(Key::S) { snowfall.stop_falling(); }
        if window.is_key_down(Key::R) { snowfall.restart_falling(); }
        if window.is_key_pressed(Key::P, KeyRepeat::No) {
            let path = format!("snowfall-{frame}.png");
            match snowfall.save_frame(&path, NIGHT) {
                Ok(()) => info!("saved {path}"),
                Err(e) => warn!("could not save frame: {e}"),
            }
        }

        snowfall.update();
        frame += 1;
        let rendered = snowfall.render_frame(NIGHT);
        for (dst, px) in buffer.iter_mut().zip(rendered.data.chunks_exact(4)) {
            *dst = rgba_to_u32(px[3], px[0], px[1], px[2]);
        }
        window.update_with_buffer(&buffer, rendered.width as usize, rendered.height as usize)
            .expect("Failed to update window buffer");
    }
}
