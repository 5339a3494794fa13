//! Tests for seeded choices and entropy grouping

#[cfg(test)]
mod tests {
    use wfc_tiles::algorithm::bitset::TileBitset;
    use wfc_tiles::algorithm::selection::{RandomSelector, entropy_groups, min_entropy_group};
    use wfc_tiles::spatial::{Cell, Grid};

    fn grid_with_counts(counts: &[[usize; 3]; 2]) -> Grid {
        let mut grid = Grid::new(3, 2);
        grid.fill(|x, y| Cell::new(TileBitset::all(counts[y][x])));
        grid
    }

    // Tests identical seeds produce identical choices
    // Verified by seeding from entropy instead of the seed
    #[test]
    fn test_seeded_determinism() {
        let mut first = RandomSelector::new(7);
        let mut second = RandomSelector::new(7);

        let a: Vec<_> = (0..32).map(|_| first.choose_index(10)).collect();
        let b: Vec<_> = (0..32).map(|_| second.choose_index(10)).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|index| index.is_some_and(|i| i < 10)));
    }

    // Tests empty inputs yield no choice
    // Verified by sampling 0..=len
    #[test]
    fn test_choose_empty() {
        let mut selector = RandomSelector::new(1);
        assert_eq!(selector.choose_index(0), None);
        assert_eq!(selector.choose::<u8>(&[]), None);
        assert_eq!(selector.choose(&[42]), Some(&42));
    }

    // Tests open cells group by option count with collapsed cells excluded
    // Verified by grouping collapsed cells under count 1
    #[test]
    fn test_entropy_groups() {
        let mut grid = grid_with_counts(&[[3, 2, 3], [2, 4, 2]]);
        grid.get_mut(1, 0).unwrap().collapse(0).unwrap();

        let groups = entropy_groups(&grid);
        let sizes: Vec<_> = groups.iter().map(|(count, cells)| (*count, cells.len())).collect();
        assert_eq!(sizes, vec![(2, 2), (3, 2), (4, 1)]);

        let lowest = min_entropy_group(&grid).unwrap();
        let positions: Vec<_> = lowest
            .iter()
            .map(|cell| grid.coordinates_of(cell).unwrap())
            .collect();
        assert_eq!(positions, vec![(0, 1), (2, 1)]);
    }

    // Tests a fully collapsed grid has no group to pick from
    // Verified by returning an empty group instead of None
    #[test]
    fn test_min_entropy_group_when_solved() {
        let mut grid = Grid::new(2, 1);
        grid.fill(|_, _| Cell::new(TileBitset::all(1)));
        for x in 0..2 {
            grid.get_mut(x, 0).unwrap().collapse(0).unwrap();
        }
        assert!(min_entropy_group(&grid).is_none());
    }
}
