use std::ops::Mul;

#[derive(
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Clone,
    Copy,
    Add,
    AddAssign,
    Sub,
    SubAssign,
)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T>
where
    T: Mul<T, Output = T> + std::ops::Add<T, Output = T> + Copy,
{
    pub fn length_squared(self) -> T {
        self.x * self.x + self.y * self.y
    }
}

impl<T> Mul<T> for Vector2<T>
where
    T: Mul<T, Output = T> + Copy,
{
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

pub type Vector2ISize = Vector2<isize>;

#[test]
fn test_vector_arithmetic() {
    let a = Vector2ISize { x: 1, y: -3 };
    let b = Vector2ISize { x: -10, y: 30 };
    assert_eq!(a + b, Vector2ISize { x: -9, y: 27 });
    assert_eq!(a - b, Vector2ISize { x: 11, y: -33 });
    assert_eq!(a * 10, Vector2ISize { x: 10, y: -30 });
}

#[test]
fn test_vector_length_squared() {
    assert_eq!(Vector2ISize { x: 3, y: 4 }.length_squared(), 25);
    assert_eq!(Vector2ISize { x: 0, y: -10 }.length_squared(), 100);
}
