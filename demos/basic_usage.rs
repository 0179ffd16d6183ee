// demos/basic_usage.rs
//! Basic usage example of the container types

use seqbuf::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Basic Buffer Usage ===\n");

    // 1. Grow by pushing
    let mut buf = Buffer::new();
    for i in 0..1000 {
        buf.push_back(i)?;
    }
    println!("Buffer length: {}", buf.len());
    println!("Buffer capacity: {}", buf.capacity());
    println!("Element 500: {}", buf.at(500));

    // 2. Resize down and back up; new slots hold the default value
    buf.resize(200)?;
    println!("After resize(200): len {}, capacity {}", buf.len(), buf.capacity());
    buf.resize(1200)?;
    println!(
        "After resize(1200): len {}, buf[199] = {}, buf[200] = {}",
        buf.len(),
        buf[199],
        buf[200]
    );

    println!("\n=== Positional Insert and Erase ===\n");

    let mut small: Buffer<i32> = (0..5).collect();
    small.insert(2, 99)?;
    println!("After insert(2, 99): {:?}", small);
    let removed = small.erase(0);
    println!("erase(0) returned {}, left {:?}", removed, small);

    println!("\n=== Shrink Policy ===\n");

    let mut shrinking = Buffer::new();
    for i in 0..100u32 {
        shrinking.push_back(i)?;
    }
    println!("Pushed 100: capacity {}", shrinking.capacity());
    for _ in 0..95 {
        shrinking.pop_back();
    }
    println!("Popped 95: len {}, capacity {}", shrinking.len(), shrinking.capacity());

    let mut keeping = Buffer::with_policy(CapacityPolicy::never_shrink());
    for i in 0..100u32 {
        keeping.push_back(i)?;
    }
    keeping.truncate(5);
    println!("never_shrink after truncate(5): capacity {}", keeping.capacity());

    println!("\n=== Construction In Place ===\n");

    let mut names: Buffer<String> = Buffer::with_capacity(4)?;
    names.emplace_back(|| String::from("ada"))?.push_str(" lovelace");
    names.extend_from_slice(&["grace".to_string(), "barbara".to_string()])?;
    println!("Names: {:?}", names);

    let copy = names.clone();
    names[0].make_ascii_uppercase();
    println!("Original after edit: {:?}", names);
    println!("Independent copy:    {:?}", copy);

    println!("\n=== Stack ===\n");

    let mut st = Stack::new();
    st.push(2)?;
    st.push(4)?;
    println!("Top: {}", st.top());
    println!("Popped: {}", st.pop());
    println!("Top now: {}", st.top());

    println!("\n=== Linked Lists ===\n");

    let mut singly: SinglyLinkedList<i32> = (1..=3).collect();
    singly.insert_at(1, 10);
    singly.push_front(0);
    println!("Singly: {:?}", singly);

    let mut doubly = DoublyLinkedList::new();
    let first = doubly.push_back("first");
    let last = doubly.push_back("last");
    doubly.insert_after(first, "middle");
    println!("Doubly: {:?}", doubly);
    doubly.remove(last);
    println!("Doubly after removing the tail: {:?}", doubly);
    println!("Stale handle lookup: {:?}", doubly.get(last));

    println!("\n=== Secure Wipe ===\n");

    let mut secrets: Buffer<u64> = (0..16).map(|i| 0xDEAD_0000 + i).collect();
    secrets.burn();
    println!(
        "After burn: len {}, capacity {}",
        secrets.len(),
        secrets.capacity()
    );

    Ok(())
}
