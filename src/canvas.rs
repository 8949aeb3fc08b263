use super::color::Rgba;

/// Opaque reference to a texture owned by the rendering backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Drawing surface particles render onto. Positions are integer pixels in
/// screen space (y-down).
pub trait Canvas {
    fn fill_circle(&mut self, center: [i32; 2], radius: i32, color: Rgba);
    fn fill_rect(&mut self, top_left: [i32; 2], size: [i32; 2], color: Rgba);
    // `opacity` multiplies the texture's own alpha.
    fn draw_texture(&mut self, texture: TextureId, top_left: [i32; 2], size: [i32; 2], opacity: u8);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Circle {
        center: [i32; 2],
        radius: i32,
        color: Rgba,
    },
    Rect {
        top_left: [i32; 2],
        size: [i32; 2],
        color: Rgba,
    },
    Texture {
        texture: TextureId,
        top_left: [i32; 2],
        size: [i32; 2],
        opacity: u8,
    },
}

// Records draw calls in submission order. Backends can replay this list;
// the headless host only counts it.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        DrawList::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for DrawList {
    fn fill_circle(&mut self, center: [i32; 2], radius: i32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_rect(&mut self, top_left: [i32; 2], size: [i32; 2], color: Rgba) {
        self.commands.push(DrawCommand::Rect {
            top_left,
            size,
            color,
        });
    }

    fn draw_texture(&mut self, texture: TextureId, top_left: [i32; 2], size: [i32; 2], opacity: u8) {
        self.commands.push(DrawCommand::Texture {
            texture,
            top_left,
            size,
            opacity,
        });
    }
}
