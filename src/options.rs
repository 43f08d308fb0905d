use clap::ValueEnum;
use crossterm::style::Color;

pub struct Theme {
    pub bg_hidden: Color,
    pub bg_revealed: Color,
    pub nums: [Color; 8],
}

// markers are drawn in clue colours
impl Theme {
    pub fn safe(&self) -> Color {
        self.nums[1]
    }

    pub fn flag(&self) -> Color {
        self.nums[4]
    }

    pub fn mine(&self) -> Color {
        self.nums[2]
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Frappe,
    BlackAndWhite,
}

impl ThemeChoice {
    pub fn theme(self) -> Theme {
        match self {
            Self::Frappe => Theme {
                bg_hidden: Color::Rgb { r: 48, g: 52, b: 70 },
                bg_revealed: Color::Rgb { r: 98, g: 104, b: 128 },
                nums: [
                    Color::Rgb { r: 140, g: 187, b: 241 },
                    Color::Rgb { r: 166, g: 209, b: 137 },
                    Color::Rgb { r: 231, g: 130, b: 132 },
                    Color::Rgb { r: 202, g: 158, b: 230 },
                    Color::Rgb { r: 239, g: 159, b: 118 },
                    Color::Rgb { r: 129, g: 200, b: 190 },
                    Color::Rgb { r: 198, g: 208, b: 245 },
                    Color::Rgb { r: 238, g: 190, b: 190 },
                ],
            },
            Self::BlackAndWhite => Theme {
                bg_hidden: Color::Grey,
                bg_revealed: Color::AnsiValue(145),
                nums: [Color::Black; 8],
            },
        }
    }
}

pub struct IconSet {
    pub safe: char,
    pub mine: char,
    pub hidden: char,
    pub flag: char,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IconSetChoice {
    Ascii,
    Latin1,
    Unicode,
}

impl IconSetChoice {
    pub fn iconset(self) -> IconSet {
        match self {
            Self::Ascii => IconSet {
                safe: '_',
                mine: '*',
                hidden: '`',
                flag: 'P',
            },
            Self::Latin1 => IconSet {
                safe: 'O',
                mine: '¤',
                hidden: '·',
                flag: '¶',
            },
            Self::Unicode => IconSet {
                safe: '✓',
                mine: '✗',
                hidden: '·',
                flag: '⚑',
            },
        }
    }
}
