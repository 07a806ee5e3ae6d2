//! SSD1306 128x64 OLED on a Linux I²C bus

use crate::frame::Panel;
use anyhow::{anyhow, Result};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use linux_embedded_hal::I2cdev;
use log::info;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

type Driver =
    Ssd1306<I2CInterface<I2cdev>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

pub struct OledPanel {
    display: Driver,
}

impl OledPanel {
    /// Open the bus, initialize the controller and blank the screen
    pub fn open(config: &oled_sens_types::DisplayConfig) -> Result<Self> {
        info!(
            "Initializing SSD1306 on {} at {:#04x}",
            config.i2c_bus, config.address
        );

        let i2c = I2cdev::new(&config.i2c_bus)
            .map_err(|e| anyhow!("Failed to open I2C bus {}: {}", config.i2c_bus, e))?;
        let interface = I2CDisplayInterface::new_custom_address(i2c, config.address);
        let rotation = if config.rotate_180 {
            DisplayRotation::Rotate180
        } else {
            DisplayRotation::Rotate0
        };

        let mut display =
            Ssd1306::new(interface, DisplaySize128x64, rotation).into_buffered_graphics_mode();
        display.init().map_err(|e| {
            anyhow!(
                "SSD1306 did not respond at {:#04x} on {} ({:?}); check wiring with `i2cdetect`",
                config.address,
                config.i2c_bus,
                e
            )
        })?;
        display.clear_buffer();
        display
            .flush()
            .map_err(|e| anyhow!("Failed to blank the display: {:?}", e))?;

        info!("Display initialized successfully");
        Ok(Self { display })
    }
}

impl OriginDimensions for OledPanel {
    fn size(&self) -> Size {
        self.display.size()
    }
}

impl DrawTarget for OledPanel {
    type Color = BinaryColor;
    type Error = <Driver as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }
}

impl Panel for OledPanel {
    fn clear_frame(&mut self) {
        self.display.clear_buffer();
    }

    fn flush_frame(&mut self) -> Result<()> {
        self.display
            .flush()
            .map_err(|e| anyhow!("Display write failed: {:?}", e))
    }
}
