//! Immutable car/color value holders.

/// A color, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    name: String,
}

impl Color {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A car and the color it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    color: Color,
}

impl Car {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_reports_its_color() {
        let car = Car::new(Color::new("red"));
        assert_eq!(car.color().name(), "red");
        assert_eq!(car.color(), &Color::new(String::from("red")));
    }
}
