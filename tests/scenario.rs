use chainmap::{ChainMap, Entry, Error, Policy};
use std::collections::HashSet;

#[test]
fn put_get_remove() {
    let mut map = ChainMap::new();
    assert_eq!(map.put(Some("a"), "Hall"), Ok(None));
    assert_eq!(map.put(Some("b"), "Hslls"), Ok(None));
    assert_eq!(map.len(), 2);
    assert!(!map.is_empty());
    assert_eq!(map.get("a"), Some(&"Hall"));

    assert_eq!(map.remove("a"), Some("Hall"));
    assert!(!map.contains_key("a"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.load_factor(), 0.75);
}

#[test]
fn null_keys() {
    let mut map: ChainMap<String, u8> = ChainMap::new();
    assert_eq!(map.put(None, 1), Err(Error::NullKey));
    assert_eq!(map.get_nullable::<str>(None), None);
    assert!(!map.contains_key_nullable::<str>(None));
    assert!(map.is_empty());
}

#[test]
fn thousand_keys_in_sixteen_slots() {
    let mut map = ChainMap::with_capacity_and_load_factor(16, 0.75).unwrap();
    for key in 0..1_000_i32 {
        assert_eq!(map.insert(key, key * 7), None);
    }
    assert_eq!(map.len(), 1_000);
    for key in 0..1_000 {
        assert_eq!(map.get(&key), Some(&(key * 7)));
    }
    assert_eq!(map.key_set().len(), map.len());
    assert_eq!(map.values().len(), map.len());
    assert_eq!(map.entry_set().len(), map.len());
}

#[test]
fn thousand_keys_without_growth() {
    let policy = Policy::new(16, f32::INFINITY).unwrap();
    let mut map = ChainMap::with_policy_and_hasher(policy, ahash::RandomState::new());
    for key in 0..1_000_u64 {
        map.insert(key, key.to_string());
    }
    assert_eq!(map.capacity(), 16);
    for key in 0..1_000_u64 {
        assert_eq!(map.get(&key), Some(&key.to_string()));
    }

    let keys = map.key_set();
    assert_eq!(keys.len(), 1_000);
    assert!((0..1_000).all(|key| keys.contains(&key)));

    let values: HashSet<String> = map.values().into_iter().collect();
    assert_eq!(values.len(), 1_000);

    for key in (0..1_000_u64).step_by(2) {
        assert_eq!(map.remove(&key), Some(key.to_string()));
    }
    assert_eq!(map.len(), 500);
    assert_eq!(map.entry_set().len(), 500);
}

#[test]
fn growth_is_invisible() {
    let mut map = ChainMap::new();
    let mut capacities = HashSet::new();
    for key in 0..200_u32 {
        map.insert(format!("key{}", key), key);
        capacities.insert(map.capacity());
        assert_eq!(map.len() as u32, key + 1);
        for earlier in 0..=key {
            assert_eq!(map[format!("key{}", earlier).as_str()], earlier);
        }
    }
    assert!(capacities.len() > 1);
    assert_eq!(map.capacity(), 512);
}

#[test]
fn put_all_disjoint() {
    let mut a = ChainMap::new();
    a.insert(1, "one");
    a.insert(2, "two");
    let mut b = ChainMap::new();
    b.insert(3, "three");

    a.put_all(&b);

    let got: HashSet<(i32, &str)> = a.entry_set().into_iter().map(Entry::into_pair).collect();
    let want: HashSet<(i32, &str)> = vec![(1, "one"), (2, "two"), (3, "three")].into_iter().collect();
    assert_eq!(got, want);
    assert_eq!(b.len(), 1);
}

#[test]
fn put_all_into_itself_via_clone() {
    let mut a: ChainMap<u8, u8> = (0..10).map(|k| (k, k)).collect();
    let copy = a.clone();
    a.put_all(&copy);
    assert_eq!(a, copy);
}

#[test]
fn entries_print() {
    let mut map = ChainMap::new();
    map.insert("Bodleian Library", "Oxford");
    let printed: Vec<String> = map.entry_set().iter().map(ToString::to_string).collect();
    assert_eq!(printed, ["Bodleian Library => Oxford"]);
}
