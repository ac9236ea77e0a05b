//! The supported sorting algorithms, each recorded through the sorter's
//! instrumentation helpers.
//!
//! Every function here runs the full algorithm against the sorter's scratch
//! buffer, emitting one [`Operation`] per elementary read, write, compare,
//! or swap. Nothing touches the visible array directly; the sorter replays
//! the recorded script step by step.
//!
//! [`Operation`]: crate::engine::operation::Operation

use serde::{Deserialize, Serialize};

use crate::engine::sorter::Sorter;
use crate::engine::SortEngine;

/// Identifier for one of the supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Cocktail,
    Insertion,
    Gnome,
    Cycle,
    Heap,
    Shell,
    OddEven,
    QuickSort,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 10] = [
        AlgorithmId::Bubble,
        AlgorithmId::Selection,
        AlgorithmId::Cocktail,
        AlgorithmId::Insertion,
        AlgorithmId::Gnome,
        AlgorithmId::Cycle,
        AlgorithmId::Heap,
        AlgorithmId::Shell,
        AlgorithmId::OddEven,
        AlgorithmId::QuickSort,
    ];

    /// Display label, matching the identifier used in the fragment encoding
    pub fn label(&self) -> &'static str {
        match self {
            AlgorithmId::Bubble => "bubble",
            AlgorithmId::Selection => "selection",
            AlgorithmId::Cocktail => "cocktail",
            AlgorithmId::Insertion => "insertion",
            AlgorithmId::Gnome => "gnome",
            AlgorithmId::Cycle => "cycle",
            AlgorithmId::Heap => "heap",
            AlgorithmId::Shell => "shell",
            AlgorithmId::OddEven => "oddEven",
            AlgorithmId::QuickSort => "quickSort",
        }
    }

    /// Record the full run of this algorithm into the sorter's script
    pub(crate) fn record(self, s: &mut Sorter) {
        match self {
            AlgorithmId::Bubble => bubble(s),
            AlgorithmId::Selection => selection(s),
            AlgorithmId::Cocktail => cocktail(s),
            AlgorithmId::Insertion => insertion(s),
            AlgorithmId::Gnome => gnome(s),
            AlgorithmId::Cycle => cycle(s),
            AlgorithmId::Heap => heap(s),
            AlgorithmId::Shell => shell(s),
            AlgorithmId::OddEven => odd_even(s),
            AlgorithmId::QuickSort => quick_sort(s),
        }
    }
}

fn bubble(s: &mut Sorter) {
    let size = s.size();

    loop {
        let mut has_swapped = false;

        for i in 0..size - 1 {
            if s.greater(i, i + 1) {
                s.swap(i, i + 1);
                has_swapped = true;
            }
        }

        if !has_swapped {
            break;
        }
    }
}

fn cocktail(s: &mut Sorter) {
    let size = s.size();

    loop {
        let mut has_swapped = false;

        for i in 0..size - 1 {
            if s.greater(i, i + 1) {
                s.swap(i, i + 1);
                has_swapped = true;
            }
        }

        if !has_swapped {
            break;
        }

        has_swapped = false;

        for i in (1..size).rev() {
            if s.greater(i - 1, i) {
                s.swap(i - 1, i);
                has_swapped = true;
            }
        }

        if !has_swapped {
            break;
        }
    }
}

fn selection(s: &mut Sorter) {
    let size = s.size();

    for i in 0..size - 1 {
        let mut min_index = i;

        for j in i + 1..size {
            if s.greater(min_index, j) {
                min_index = j;
            }
        }

        if min_index != i {
            s.swap(i, min_index);
        }
    }
}

fn insertion(s: &mut Sorter) {
    let size = s.size();

    for i in 1..size {
        let mut j = i;
        while j > 0 && s.greater(j - 1, j) {
            s.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn gnome(s: &mut Sorter) {
    let size = s.size();
    let mut index = 0;

    while index < size {
        if index == 0 || !s.greater(index - 1, index) {
            index += 1;
        } else {
            s.swap(index - 1, index);
            index -= 1;
        }
    }
}

fn cycle(s: &mut Sorter) {
    let size = s.size();

    for cycle_start in 0..size - 1 {
        let mut item = s.read(cycle_start);
        let mut pos = cycle_start;

        for i in cycle_start + 1..size {
            if s.read(i) < item {
                pos += 1;
            }
        }

        if pos == cycle_start {
            continue;
        }

        while item == s.read(pos) {
            pos += 1;
        }

        let mut displaced = s.read(pos);
        s.write(pos, item);
        item = displaced;

        while pos != cycle_start {
            pos = cycle_start;

            for i in cycle_start + 1..size {
                if s.read(i) < item {
                    pos += 1;
                }
            }

            while item == s.read(pos) {
                pos += 1;
            }

            if item != s.read(pos) {
                displaced = s.read(pos);
                s.write(pos, item);
                item = displaced;
            }
        }
    }
}

fn heap(s: &mut Sorter) {
    fn sift_down(s: &mut Sorter, heap_size: usize, root: usize) {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        if left < heap_size && s.greater(left, largest) {
            largest = left;
        }

        if right < heap_size && s.greater(right, largest) {
            largest = right;
        }

        if largest != root {
            s.swap(root, largest);
            sift_down(s, heap_size, largest);
        }
    }

    let size = s.size();

    for i in (0..size / 2).rev() {
        sift_down(s, size, i);
    }

    for i in (1..size).rev() {
        s.swap(0, i);
        sift_down(s, i, 0);
    }
}

fn shell(s: &mut Sorter) {
    let size = s.size();
    let mut gap = size / 2;

    while gap > 0 {
        for i in gap..size {
            let mut j = i;
            while j >= gap && s.greater(j - gap, j) {
                s.swap(j - gap, j);
                j -= gap;
            }
        }
        gap /= 2;
    }
}

fn odd_even(s: &mut Sorter) {
    let size = s.size();
    let mut sorted = false;

    while !sorted {
        sorted = true;

        for i in (1..size - 1).step_by(2) {
            if s.greater(i, i + 1) {
                s.swap(i, i + 1);
                sorted = false;
            }
        }

        for i in (0..size - 1).step_by(2) {
            if s.greater(i, i + 1) {
                s.swap(i, i + 1);
                sorted = false;
            }
        }
    }
}

fn quick_sort(s: &mut Sorter) {
    fn sort_range(s: &mut Sorter, low: usize, high: usize) {
        if low < high {
            let pivot_index = partition(s, low, high);
            if pivot_index > 0 {
                sort_range(s, low, pivot_index - 1);
            }
            sort_range(s, pivot_index + 1, high);
        }
    }

    fn partition(s: &mut Sorter, low: usize, high: usize) -> usize {
        let pivot = s.read(high);
        let mut i = low;

        for j in low..high {
            if s.read(j) < pivot {
                s.swap(i, j);
                i += 1;
            }
        }

        s.swap(i, high);
        i
    }

    let size = s.size();
    if size > 0 {
        sort_range(s, 0, size - 1);
    }
}
