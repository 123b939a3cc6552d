use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Separable gaussian blur over premultiplied RGBA, used for the blurred
/// double-outline halo. Edge pixels are clamp-extended.
pub(crate) fn gaussian_blur(pixmap: &mut Pixmap, sigma: f32) {
    let Some((kernel, radius)) = build_kernel(sigma) else {
        return;
    };

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;

    let src: Vec<[f32; 4]> = pixmap
        .pixels()
        .iter()
        .map(|p| {
            [
                p.red() as f32,
                p.green() as f32,
                p.blue() as f32,
                p.alpha() as f32,
            ]
        })
        .collect();

    let convolve = |input: &[[f32; 4]], horizontal: bool| -> Vec<[f32; 4]> {
        let mut out = vec![[0.0f32; 4]; input.len()];
        let limit = (if horizontal { width } else { height }) as isize;
        for y in 0..height {
            for x in 0..width {
                let mut acc = [0.0f32; 4];
                for (k, weight) in kernel.iter().enumerate() {
                    let offset = k as isize - radius as isize;
                    let (sx, sy) = if horizontal {
                        ((x as isize + offset).clamp(0, limit - 1) as usize, y)
                    } else {
                        (x, (y as isize + offset).clamp(0, limit - 1) as usize)
                    };
                    let sample = input[sy * width + sx];
                    for c in 0..4 {
                        acc[c] += sample[c] * weight;
                    }
                }
                out[y * width + x] = acc;
            }
        }
        out
    };

    let blurred = convolve(&convolve(&src, true), false);

    for (px, vals) in pixmap.pixels_mut().iter_mut().zip(blurred.iter()) {
        // Premultiplied invariant: channels may not exceed alpha.
        let a = vals[3].round().clamp(0.0, 255.0) as u8;
        let r = (vals[0].round().clamp(0.0, 255.0) as u8).min(a);
        let g = (vals[1].round().clamp(0.0, 255.0) as u8).min(a);
        let b = (vals[2].round().clamp(0.0, 255.0) as u8).min(a);
        *px = PremultipliedColorU8::from_rgba(r, g, b, a)
            .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
}

fn build_kernel(sigma: f32) -> Option<(Vec<f32>, usize)> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return None;
    }
    let radius = (sigma * 3.0).ceil() as usize;
    if radius == 0 {
        return None;
    }
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..=radius * 2)
        .map(|i| {
            let d = i as f32 - radius as f32;
            (-d * d / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    Some((kernel, radius))
}
