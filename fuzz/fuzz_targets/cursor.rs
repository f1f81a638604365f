#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use obml_wire::ByteCursor;

#[derive(Arbitrary, Debug)]
enum Op {
    U8,
    I16,
    U24,
    Coord,
    Rect,
    Color,
    String,
    Url,
    Blob,
    BlobAlt,
    Skip(u16),
    Seek(u32),
    Bounded(u32),
}

#[derive(Arbitrary, Debug)]
struct Input {
    bytes: Vec<u8>,
    ops: Vec<Op>,
}

// Fuzz target: ByteCursor primitives in arbitrary order.
//
// Catches bugs in:
// - Offset arithmetic near the end of input
// - Bounded sub-cursors past the source length
// - NUL-led URL handling on short strings
// - Position moving backwards after a failed read
fuzz_target!(|input: Input| {
    let mut cur = ByteCursor::new(&input.bytes);
    for op in input.ops {
        let before = cur.tell();
        let ok = match op {
            Op::U8 => cur.read_u8().is_ok(),
            Op::I16 => cur.read_i16().is_ok(),
            Op::U24 => cur.read_u24().is_ok(),
            Op::Coord => cur.read_coord().is_ok(),
            Op::Rect => cur.read_rect().is_ok(),
            Op::Color => cur.read_color().is_ok(),
            Op::String => cur.read_string().is_ok(),
            Op::Url => cur.read_url().is_ok(),
            Op::Blob => cur.skip_blob().is_ok(),
            Op::BlobAlt => cur.skip_blob_alt().is_ok(),
            Op::Skip(n) => cur.skip(usize::from(n)).is_ok(),
            Op::Seek(to) => {
                let _ = cur.seek(to as usize);
                assert!(cur.tell() <= cur.len());
                continue;
            }
            Op::Bounded(end) => {
                let sub = cur.bounded(end as usize);
                assert!(sub.len() <= cur.len());
                assert_eq!(sub.tell(), cur.tell().min(sub.len()));
                continue;
            }
        };
        assert!(cur.tell() <= cur.len());
        if ok {
            assert!(cur.tell() >= before);
        }
    }
});
