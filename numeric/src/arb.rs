use crate::{Integer, RoundMode};
use num_bigint::{BigInt, Sign};
use quickcheck::{Arbitrary, Gen};

impl Arbitrary for Integer {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 8 {
            0..=2 => Integer::Small(i64::from(i16::arbitrary(g))),
            3 | 4 => Integer::Small(i64::arbitrary(g)),
            // right around the word boundary, on both sides
            5 => {
                let edge = *g.choose(&[i64::MIN, i64::MAX]).unwrap_or(&i64::MAX);
                let offset = i128::from(i8::arbitrary(g));
                Integer::from_i128(i128::from(edge) + offset)
            }
            _ => {
                let mut bytes: Vec<u8> = Arbitrary::arbitrary(g);
                bytes.extend_from_slice(&u64::arbitrary(g).to_le_bytes());
                let sign = if bool::arbitrary(g) { Sign::Minus } else { Sign::Plus };
                Integer::from_big(BigInt::from_bytes_le(sign, &bytes))
            }
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Integer::Small(x) => Box::new(x.shrink().map(Integer::Small)),
            // halving a big value eventually lands in a word
            Integer::Big(b) => {
                let half = Integer::from_big(b.as_bigint() / 2);
                Box::new(std::iter::once(half))
            }
        }
    }
}

impl Arbitrary for RoundMode {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(RoundMode::ALL).unwrap_or(&RoundMode::HalfUp)
    }
}
