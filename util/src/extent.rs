use serde::de::{self, IntoDeserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::cmp::Ordering::*;
use std::fmt;
use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use std::str::FromStr;
use Extent::*;

const INFINITY: &str = "Infinity";

/// A count or length that may be unbounded, e.g. the size of an endless sequence.
///
/// `Infinite` compares greater than every finite value.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum Extent<T> {
    Finite(T),
    Infinite,
}

impl<T: Serialize> Serialize for Extent<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Infinite => serializer.serialize_str(INFINITY),
            Finite(x) => Serialize::serialize(x, serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Extent<T> {
    fn deserialize<D>(deserializer: D) -> Result<Extent<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExtentVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for ExtentVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = Extent<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or \"Infinity\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match v {
                    INFINITY => Ok(Infinite),
                    v => {
                        let res: Result<T, E> = Deserialize::deserialize(v.into_deserializer());
                        res.map(Extent::from)
                    }
                }
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let res: Result<T, E> = Deserialize::deserialize(v.into_deserializer());
                res.map(Extent::from)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let res: Result<T, E> = Deserialize::deserialize(v.into_deserializer());
                res.map(Extent::from)
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let res: Result<T, E> = Deserialize::deserialize(v.into_deserializer());
                res.map(Extent::from)
            }
        }

        deserializer.deserialize_any(ExtentVisitor(PhantomData))
    }
}

impl<T: Ord> Ord for Extent<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Finite(a), Finite(b)) => a.cmp(b),
            (Infinite, Infinite) => Equal,
            (Infinite, _) => Greater,
            (_, Infinite) => Less,
        }
    }
}

impl<T: PartialOrd> PartialOrd for Extent<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Finite(a), Finite(b)) => a.partial_cmp(b),
            (Infinite, Infinite) => Some(Equal),
            (Infinite, _) => Some(Greater),
            (_, Infinite) => Some(Less),
        }
    }
}

impl<T> From<T> for Extent<T> {
    fn from(value: T) -> Extent<T> {
        Finite(value)
    }
}

impl<T: Display> Display for Extent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finite(x) => write!(f, "{}", x),
            Infinite => f.write_str(INFINITY),
        }
    }
}

impl<T: FromStr> FromStr for Extent<T> {
    type Err = <T as FromStr>::Err;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            INFINITY => Ok(Infinite),
            text => text.parse().map(Finite),
        }
    }
}

impl<T> Extent<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Finite(_))
    }

    pub fn finite(self) -> Option<T> {
        match self {
            Finite(x) => Some(x),
            Infinite => None,
        }
    }
}
