use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::mask::Mask;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|row| row.iter().collect()).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row(y).contains(needle))
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Nothing to do headless
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: one frame of terminal cells over the world ---
// Each cell shows whatever covers the world pixel at its center.
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn fill(&mut self, c: char) {
        self.grid = vec![vec![c; self.width as usize]; self.height as usize];
    }

    pub fn clear(&mut self) {
        self.fill(' ');
    }

    pub fn row_string(&self, y: u16) -> String {
        self.grid.get(y as usize).map(|row| row.iter().collect()).unwrap_or_default()
    }

    /// World pixel sampled by cell `(x, y)`.
    pub fn cell_center(&self, x: u16, y: u16) -> (i32, i32) {
        let wx = (x as f64 + 0.5) * SCREEN_WIDTH as f64 / self.width as f64;
        let wy = (y as f64 + 0.5) * SCREEN_HEIGHT as f64 / self.height as f64;
        (wx.floor() as i32, wy.floor() as i32)
    }

    /// World y -> cell row, for placing text at world heights.
    pub fn row_for_world_y(&self, world_y: i32) -> u16 {
        let row = world_y as i64 * self.height as i64 / SCREEN_HEIGHT as i64;
        row.clamp(0, self.height.saturating_sub(1) as i64) as u16
    }

    /// Paints the world rectangle at `(left, top)` of `width`x`height`.
    /// `paint` gets rectangle-local pixel coordinates and returns the glyph,
    /// or `None` to leave the cell alone.
    pub fn paint_world(
        &mut self,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        paint: impl Fn(i32, i32) -> Option<char>,
    ) {
        let to_cell_x = |wx: i32| wx as i64 * self.width as i64 / SCREEN_WIDTH as i64;
        let to_cell_y = |wy: i32| wy as i64 * self.height as i64 / SCREEN_HEIGHT as i64;
        let x_start = to_cell_x(left).clamp(0, self.width as i64);
        let x_end = (to_cell_x(left + width) + 1).clamp(0, self.width as i64);
        let y_start = to_cell_y(top).clamp(0, self.height as i64);
        let y_end = (to_cell_y(top + height) + 1).clamp(0, self.height as i64);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let (wx, wy) = self.cell_center(x as u16, y as u16);
                let (local_x, local_y) = (wx - left, wy - top);
                if local_x < 0 || local_y < 0 || local_x >= width || local_y >= height {
                    continue;
                }
                if let Some(c) = paint(local_x, local_y) {
                    self.grid[y as usize][x as usize] = c;
                }
            }
        }
    }

    pub fn blit_mask(&mut self, mask: &Mask, left: i32, top: i32, c: char) {
        self.paint_world(left, top, mask.width() as i32, mask.height() as i32, |x, y| {
            mask.get(x as usize, y as usize).then_some(c)
        });
    }

    pub fn write_str(&mut self, x: u16, y: u16, s: &str) {
        for (i, c) in s.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn write_str_right(&mut self, y: u16, s: &str, margin: u16) {
        let x = self.width.saturating_sub(s.chars().count() as u16 + margin);
        self.write_str(x, y, s);
    }

    pub fn write_str_centered(&mut self, y: u16, s: &str) {
        let x = (self.width / 2).saturating_sub(s.chars().count() as u16 / 2);
        self.write_str(x, y, s);
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.row_string(y))?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}
