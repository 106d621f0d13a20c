//! Decoding whole messages

use bertlv::{Category, ErrorKind, Length, Node, Tag, Tree};
use hex_literal::hex;

const FCI_HEX: &str = "6F1A840E315041592E5359532E4444463031A5088801025F2D02656E";
const FCI: [u8; 28] = hex!("6F1A840E315041592E5359532E4444463031A5088801025F2D02656E");

fn check_fci(tree: &Tree) {
    assert_eq!(tree.len(), 1);

    let fci = &tree.nodes()[0];
    assert_eq!(fci.tag().value(), 0x6F);
    assert_eq!(fci.len(), 26);
    assert!(fci.is_constructed());
    assert_eq!(fci.data(), &FCI[2..]);
    assert_eq!(fci.children().len(), 2);

    let df_name = &fci.children()[0];
    assert_eq!(df_name.tag().value(), 0x84);
    assert_eq!(df_name.len(), 14);
    assert!(!df_name.is_constructed());
    assert_eq!(df_name.data(), &hex!("315041592E5359532E4444463031"));
    assert_eq!(df_name.data(), b"1PAY.SYS.DDF01");

    let proprietary = &fci.children()[1];
    assert_eq!(proprietary.tag().value(), 0xA5);
    assert_eq!(proprietary.len(), 8);
    assert!(proprietary.is_constructed());
    assert_eq!(proprietary.data(), &hex!("8801025F2D02656E"));
    assert_eq!(
        proprietary.children(),
        &[
            Node::Primitive { tag: Tag::new(0x88), data: vec![0x02] },
            Node::Primitive { tag: Tag::new(0x5F2D), data: vec![0x65, 0x6E] },
        ]
    );
}

#[test]
fn parse_hex_sample() {
    check_fci(&bertlv::parse_hex(FCI_HEX).unwrap());
}

#[test]
fn parse_bytes_sample() {
    check_fci(&bertlv::parse(&FCI).unwrap());
}

#[test]
fn hex_and_bytes_agree() {
    assert_eq!(Tree::parse_hex(FCI_HEX).unwrap(), Tree::parse(&FCI).unwrap());
    assert_eq!(Tree::parse_hex(&FCI_HEX.to_lowercase()).unwrap(), Tree::parse(&FCI).unwrap());
    assert_eq!(FCI_HEX.parse::<Tree>().unwrap(), Tree::try_from(&FCI[..]).unwrap());
}

#[test]
fn several_top_level_objects() {
    let tree = Tree::parse(&hex!("9F02 06 000000001000  5A 07 47617390010100")).unwrap();
    assert_eq!(tree.len(), 2);
    let tags: Vec<u32> = (&tree).into_iter().map(|node| node.tag().value()).collect();
    assert_eq!(tags, vec![0x9F02, 0x5A]);
}

#[test]
fn deep_nesting() {
    // BF0C is constructed, so its value 9F4D81 must decode as a data object
    let err = Tree::parse(&hex!("70 08 A5 06 BF0C 03 9F4D 81")).unwrap_err();
    assert_eq!(err.category(), Category::Truncated);
    assert_eq!(err.position(), Some(Length::from(10u8)));

    let tree = Tree::parse(&hex!("70 08 A5 06 BF0C 03 9F4D 00")).unwrap();
    let outer = &tree.nodes()[0];
    let middle = &outer.children()[0];
    let inner = &middle.children()[0];
    assert_eq!(inner.tag().value(), 0xBF0C);
    assert_eq!(inner.children()[0].tag().value(), 0x9F4D);
    assert!(inner.children()[0].is_empty());
}

#[test]
fn long_form_lengths() {
    for marker in [0x81u8, 0x82, 0x83, 0x84] {
        let count = (marker & 0x7F) as usize;
        // keeps the whole input at an even number of bytes
        let len = 200 + count % 2;

        let mut bytes = vec![0xC1, marker];
        bytes.extend_from_slice(&(len as u32).to_be_bytes()[4 - count..]);
        bytes.extend(std::iter::repeat(0xAB).take(len));

        let tree = Tree::parse(&bytes).unwrap();
        let node = &tree.nodes()[0];
        assert_eq!(node.tag().value(), 0xC1);
        assert_eq!(node.len(), len);
        assert!(node.data().iter().all(|&b| b == 0xAB));
    }
}

#[test]
fn two_byte_length_over_255() {
    let mut bytes = vec![0x53, 0x82, 0x01, 0x2C];
    bytes.extend(std::iter::repeat(0x11).take(300));
    let tree = Tree::parse(&bytes).unwrap();
    assert_eq!(tree.nodes()[0].len(), 300);
}

#[test]
fn constructed_with_long_form_length() {
    let mut value = Vec::new();
    for i in 0..40u8 {
        value.extend_from_slice(&[0x9F, 0x10, 0x02, i, i]);
    }
    assert_eq!(value.len(), 200);

    let mut bytes = vec![0x77, 0x81, 0xC8];
    bytes.extend_from_slice(&value);
    // tag 00, one byte of value
    bytes.extend_from_slice(&[0x00, 0x01, 0x00]);

    let tree = Tree::parse(&bytes).unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.nodes()[0].children().len(), 40);
    assert_eq!(tree.nodes()[0].data(), &value[..]);
    assert_eq!(tree.find_tag(0x9F10).len(), 40);
}

#[test]
fn rejects_blank_hex() {
    for input in ["", " ", "  ", "\t\n", "    "] {
        let err = Tree::parse_hex(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Empty);
        assert_eq!(err.category(), Category::Input);
    }
}

#[test]
fn rejects_odd_hex() {
    let err = Tree::parse_hex("1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OddLength { len: 1 });
    assert_eq!(err.category(), Category::Input);
    assert!(err.position().is_none());
}

#[test]
fn rejects_invalid_hex() {
    let err = Tree::parse_hex("6F0G").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHexCharacter { c: 'G', index: 3 });
    assert_eq!(err.category(), Category::Input);

    let err = Tree::parse_hex("6F 01 00").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHexCharacter { c: ' ', index: 2 });
}

#[test]
fn hex_errors_count_characters() {
    // two characters, three UTF-8 bytes
    let err = Tree::parse_hex("aé").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHexCharacter { c: 'é', index: 1 });

    let err = Tree::parse_hex("aéb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OddLength { len: 3 });

    let err = Tree::parse_hex("5A01é7").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidHexCharacter { c: 'é', index: 4 });
}

#[test]
fn rejects_empty_bytes() {
    let err = Tree::parse(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Empty);
    assert_eq!(err.category(), Category::Input);
}

#[test]
fn rejects_odd_bytes() {
    // `01` alone would be a truncated object; the length check comes first
    let err = Tree::parse(&[0x01]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OddLength { len: 1 });

    // a well-formed object of odd length is still refused
    let err = Tree::parse(&hex!("5A 01 47")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OddLength { len: 3 });
}

#[test]
fn truncated_streams() {
    // mid-tag
    let err = Tree::parse(&hex!("5A 00 9F 81")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
    assert_eq!(err.position(), Some(Length::from(4u8)));

    // mid-length
    let err = Tree::parse(&hex!("5A 82")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
    assert_eq!(err.position(), Some(Length::from(2u8)));

    // mid-value
    let err = Tree::parse(&hex!("5A 08 4761")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
    assert_eq!(err.position(), Some(Length::from(2u8)));
    assert_eq!(err.category(), Category::Truncated);
}

#[test]
fn empty_constructed_fails_whole_parse() {
    let err = Tree::parse(&hex!("5A 01 47 6F 00 00")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyConstructed { tag: Tag::new(0x6F) });
    assert_eq!(err.category(), Category::Structure);
    assert_eq!(err.position(), Some(Length::from(5u8)));
}

#[test]
fn unsupported_length_forms() {
    let err = Tree::parse(&hex!("5A 80 47 00")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedLength { byte: 0x80 });
    assert_eq!(err.category(), Category::Unsupported);

    let err = Tree::parse(&hex!("5A 85 00 00 00 00 01 47")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedLength { byte: 0x85 });
}

#[test]
fn overlong_tag() {
    let err = Tree::parse(&hex!("9F 81 82 83 84 05 00 00")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TagTooLong { max: Tag::MAX_ENCODED_LEN });
    assert_eq!(err.category(), Category::Unsupported);
}

/// `levels` constructed `21` objects, each wrapping the next, around one
/// primitive; always an even number of bytes.
fn nested(levels: usize) -> Vec<u8> {
    let leaf: &[u8] = if levels % 2 == 0 { &[0x01, 0x00] } else { &[0x01, 0x01, 0x00] };

    // headers from the innermost outwards
    let mut headers = Vec::with_capacity(levels);
    let mut len = leaf.len() as u32;
    for _ in 0..levels {
        let be = len.to_be_bytes();
        headers.push([0x21, 0x83, be[1], be[2], be[3]]);
        len += 5;
    }

    let mut bytes: Vec<u8> = headers.iter().rev().flatten().copied().collect();
    bytes.extend_from_slice(leaf);
    bytes
}

#[test]
fn nesting_up_to_max_depth() {
    for levels in [1, Node::MAX_DEPTH - 1, Node::MAX_DEPTH] {
        let tree = Tree::parse(&nested(levels)).unwrap();
        assert_eq!(tree.iter().count(), levels + 1);
        assert_eq!(tree.iter().filter(|node| node.is_constructed()).count(), levels);
    }
}

#[test]
fn nesting_past_max_depth() {
    for levels in [Node::MAX_DEPTH + 1, Node::MAX_DEPTH + 2] {
        let err = Tree::parse(&nested(levels)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooDeep { max: Node::MAX_DEPTH });
        assert_eq!(err.category(), Category::Unsupported);
        assert_eq!(err.position(), Some(Length::from(5 * (Node::MAX_DEPTH as u32 + 1))));
    }
}

#[test]
fn very_deep_nesting_fails_cleanly() {
    // about 100 KB of nesting headers
    let err = Tree::parse(&nested(20_000)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooDeep { max: Node::MAX_DEPTH });

    let err = Tree::parse_hex(&hex::encode(nested(20_000))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooDeep { max: Node::MAX_DEPTH });
}

#[test]
fn error_display() {
    let err = Tree::parse(&hex!("5A 08 4761")).unwrap_err();
    assert_eq!(err.to_string(), "BER-TLV message is truncated at BER-TLV byte 2");

    let err = Tree::parse_hex("").unwrap_err();
    assert_eq!(err.to_string(), "input is empty");

    let err = Tree::parse(&nested(Node::MAX_DEPTH + 1)).unwrap_err();
    assert_eq!(err.to_string(), "BER-TLV data objects nested deeper than 64 levels at BER-TLV byte 325");
}
